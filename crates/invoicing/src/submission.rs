//! Hand-off of a finished draft to a submission collaborator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use taxinvoice_core::{DomainError, DomainResult, DraftId, LineId};

use crate::draft::InvoiceDraft;
use crate::header::InvoiceHeader;
use crate::line::{LineItem, UnitOfMeasure};
use crate::totals::{line_amount, line_tax, Totals};

/// A line as it is handed over, with its computed amount and tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedLine {
    pub line_id: LineId,
    pub description: String,
    pub classification_code: String,
    pub quantity: Decimal,
    pub unit: UnitOfMeasure,
    pub unit_rate: Decimal,
    pub tax_rate_percent: Decimal,
    pub schedule_reference: String,
    pub amount: Decimal,
    pub tax: Decimal,
}

impl TryFrom<&LineItem> for SubmittedLine {
    type Error = DomainError;

    fn try_from(line: &LineItem) -> DomainResult<Self> {
        Ok(Self {
            line_id: line.id_typed(),
            description: line.description().to_string(),
            classification_code: line.classification_code().to_string(),
            quantity: line.quantity(),
            unit: line.unit(),
            unit_rate: line.unit_rate(),
            tax_rate_percent: line.tax_rate_percent(),
            schedule_reference: line.schedule_reference().to_string(),
            amount: line_amount(line)?,
            tax: line_tax(line)?,
        })
    }
}

/// Snapshot of a draft: header, ordered lines and totals at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSubmission {
    pub draft_id: DraftId,
    pub header: InvoiceHeader,
    pub lines: Vec<SubmittedLine>,
    pub totals: Totals,
}

impl InvoiceSubmission {
    /// Fails with `DomainError::OutOfRange` when a figure does not fit a
    /// `Decimal`; nothing is handed over in that case.
    pub fn from_draft(draft: &InvoiceDraft) -> DomainResult<Self> {
        let lines = draft
            .lines()
            .iter()
            .map(SubmittedLine::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self {
            draft_id: draft.id_typed(),
            header: draft.header().clone(),
            lines,
            totals: draft.totals()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Draft,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub draft_id: DraftId,
    pub kind: SubmissionKind,
    pub message: String,
}

/// Receives finished drafts. Implementations decide where they go.
pub trait Submitter {
    /// Keep the draft for later editing. No header validation.
    fn save_draft(&self, submission: &InvoiceSubmission) -> DomainResult<Acknowledgement>;

    /// Send the invoice onward. The header must be complete.
    fn submit(&self, submission: &InvoiceSubmission) -> DomainResult<Acknowledgement>;
}

/// Accepts everything and only logs; no external system is contacted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSubmitter;

impl Submitter for MockSubmitter {
    fn save_draft(&self, submission: &InvoiceSubmission) -> DomainResult<Acknowledgement> {
        tracing::info!(
            draft_id = %submission.draft_id,
            lines = submission.lines.len(),
            "invoice saved as draft"
        );
        Ok(Acknowledgement {
            draft_id: submission.draft_id,
            kind: SubmissionKind::Draft,
            message: "Invoice saved as draft".to_string(),
        })
    }

    fn submit(&self, submission: &InvoiceSubmission) -> DomainResult<Acknowledgement> {
        submission.header.validate()?;
        tracing::info!(
            draft_id = %submission.draft_id,
            invoice_number = %submission.header.invoice_number,
            grand_total = %submission.totals.grand_total,
            "invoice submitted"
        );
        Ok(Acknowledgement {
            draft_id: submission.draft_id,
            kind: SubmissionKind::Submitted,
            message: "Invoice submitted to FBR successfully".to_string(),
        })
    }
}
