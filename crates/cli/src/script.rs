//! Replayable scripts of form edits.
//!
//! A script is a JSON array of steps. Lines are addressed by their position in
//! the draft at the time the step runs, since line ids are minted while the
//! script executes.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, Read};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use taxinvoice_core::{format_amount, LineId};
use taxinvoice_invoicing::{
    Acknowledgement, FieldEdit, HeaderEdit, InvoiceDraft, InvoiceSubmission, LineField, Submitter,
    Totals,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    AddLine,
    RemoveLine {
        line: usize,
    },
    /// `value` is the raw text a form control would hold.
    UpdateField {
        line: usize,
        field: LineField,
        value: String,
    },
    UpdateHeader {
        edit: HeaderEdit,
    },
    SaveDraft,
    Submit,
}

/// A step that did not take effect, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedStep {
    pub step: usize,
    pub reason: String,
}

/// Totals as displayed: two fraction digits, half up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTotals {
    pub subtotal: String,
    pub tax_total: String,
    pub grand_total: String,
}

impl From<&Totals> for DisplayTotals {
    fn from(totals: &Totals) -> Self {
        Self {
            subtotal: format_amount(totals.subtotal),
            tax_total: format_amount(totals.tax_total),
            grand_total: format_amount(totals.grand_total),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub submission: InvoiceSubmission,
    pub display_totals: DisplayTotals,
    pub acknowledgements: Vec<Acknowledgement>,
    pub rejected: Vec<RejectedStep>,
}

/// Read a script from `path`, or from stdin when no path is given.
pub fn read_script(path: Option<OsString>) -> anyhow::Result<Vec<ScriptStep>> {
    let reader: Box<dyn Read> = match &path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening script {}", path.to_string_lossy()))?,
        )),
        None => Box::new(std::io::stdin().lock()),
    };
    serde_json::from_reader(reader).context("parsing script")
}

/// Apply every step to `draft`. Refused steps are recorded and skipped.
///
/// Fails only when the final draft's figures do not fit a decimal.
pub fn run_script(
    mut draft: InvoiceDraft,
    steps: &[ScriptStep],
    submitter: &dyn Submitter,
) -> anyhow::Result<ScriptReport> {
    let mut acknowledgements = Vec::new();
    let mut rejected = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        match apply_step(&mut draft, step, submitter) {
            Ok(Some(ack)) => acknowledgements.push(ack),
            Ok(None) => {}
            Err(reason) => {
                tracing::warn!(step = index, %reason, "script step rejected");
                rejected.push(RejectedStep {
                    step: index,
                    reason,
                });
            }
        }
    }

    let submission =
        InvoiceSubmission::from_draft(&draft).context("building the final invoice snapshot")?;
    Ok(ScriptReport {
        display_totals: DisplayTotals::from(&submission.totals),
        submission,
        acknowledgements,
        rejected,
    })
}

fn apply_step(
    draft: &mut InvoiceDraft,
    step: &ScriptStep,
    submitter: &dyn Submitter,
) -> Result<Option<Acknowledgement>, String> {
    match step {
        ScriptStep::AddLine => {
            draft.add_line();
        }
        ScriptStep::RemoveLine { line } => {
            let line_id = line_at(draft, *line)?;
            draft.remove_line(line_id).map_err(|e| e.to_string())?;
        }
        ScriptStep::UpdateField { line, field, value } => {
            let line_id = line_at(draft, *line)?;
            let edit = FieldEdit::from_form(*field, value).map_err(|e| e.to_string())?;
            draft.update_field(line_id, edit).map_err(|e| e.to_string())?;
        }
        ScriptStep::UpdateHeader { edit } => {
            draft.update_header(edit.clone()).map_err(|e| e.to_string())?;
        }
        ScriptStep::SaveDraft => {
            let submission = InvoiceSubmission::from_draft(draft).map_err(|e| e.to_string())?;
            return submitter
                .save_draft(&submission)
                .map(Some)
                .map_err(|e| e.to_string());
        }
        ScriptStep::Submit => {
            let submission = InvoiceSubmission::from_draft(draft).map_err(|e| e.to_string())?;
            return submitter
                .submit(&submission)
                .map(Some)
                .map_err(|e| e.to_string());
        }
    }
    Ok(None)
}

fn line_at(draft: &InvoiceDraft, position: usize) -> Result<LineId, String> {
    draft
        .lines()
        .get(position)
        .map(|line| line.id_typed())
        .ok_or_else(|| format!("no line at position {position}"))
}
