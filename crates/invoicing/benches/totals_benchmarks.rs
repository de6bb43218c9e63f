use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use rust_decimal::Decimal;
use taxinvoice_invoicing::{FieldEdit, InvoiceDraft, Totals};
use taxinvoice_reference::hs_code_master;

/// Draft with `n` priced, classified lines cycling through the master list.
fn populated_draft(n: usize) -> InvoiceDraft {
    let reference = Arc::new(hs_code_master());
    let codes: Vec<String> = reference.iter().map(|e| e.code.clone()).collect();
    let mut draft = InvoiceDraft::start(reference);

    for i in 0..n {
        let line_id = if i == 0 {
            draft.lines()[0].id_typed()
        } else {
            draft.add_line()
        };
        let edits = [
            FieldEdit::Quantity(Decimal::new((i as i64 % 50) + 1, 0)),
            FieldEdit::UnitRate(Decimal::new(12_345 + i as i64, 2)),
            FieldEdit::ClassificationCode(codes[i % codes.len()].clone()),
        ];
        for edit in edits {
            draft.update_field(line_id, edit).expect("line exists");
        }
    }
    draft
}

fn bench_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("totals");
    for size in [1usize, 10, 100, 1_000] {
        let draft = populated_draft(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &draft, |b, draft| {
            b.iter(|| Totals::of(black_box(draft.lines())))
        });
    }
    group.finish();
}

fn bench_classification_edit(c: &mut Criterion) {
    let mut draft = populated_draft(100);
    let line_id = draft.lines()[50].id_typed();
    let codes = ["8479.89.00", "3920.10.00", "UNKNOWN-CODE"];
    let mut i = 0usize;

    c.bench_function("update_field/classification_code", |b| {
        b.iter(|| {
            let edit = FieldEdit::ClassificationCode(codes[i % codes.len()].to_string());
            i += 1;
            draft.update_field(line_id, black_box(edit)).expect("line exists");
        })
    });
}

criterion_group!(benches, bench_totals, bench_classification_edit);
criterion_main!(benches);
