use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use taxinvoice_core::{Aggregate, AggregateRoot, DomainResult, DraftId, Event, LineId};
use taxinvoice_reference::ReferenceTable;

use crate::header::{HeaderEdit, InvoiceHeader};
use crate::line::{FieldEdit, LineItem, LineValue};
use crate::totals::Totals;

/// Why a draft command was refused. The draft is unchanged after a refusal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftRefusal {
    #[error("cannot remove the last remaining line")]
    CannotRemoveLastLine,

    #[error("no line with id {0}")]
    UnknownLine(LineId),

    #[error("line id {0} was already issued in this draft")]
    DuplicateLine(LineId),
}

/// Aggregate root: InvoiceDraft.
///
/// One editing session of an invoice. Lines keep their insertion order, which
/// is also display and totals order.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    id: DraftId,
    reference: Arc<ReferenceTable>,
    header: InvoiceHeader,
    lines: Vec<LineItem>,
    issued: HashSet<LineId>,
    version: u64,
}

impl PartialEq for InvoiceDraft {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.header == other.header
            && self.lines == other.lines
            && self.issued == other.issued
            && self.version == other.version
            && (Arc::ptr_eq(&self.reference, &other.reference)
                || self.reference == other.reference)
    }
}

impl Eq for InvoiceDraft {}

impl InvoiceDraft {
    /// Start a new session with a single blank line.
    pub fn start(reference: Arc<ReferenceTable>) -> Self {
        let mut draft = Self::empty(DraftId::new(), reference);
        draft.add_line();
        draft
    }

    /// Rebuild a draft from its event history.
    ///
    /// The history of a started draft begins with the `LineAdded` of its first
    /// line.
    pub fn rehydrate<'a>(
        id: DraftId,
        reference: Arc<ReferenceTable>,
        events: impl IntoIterator<Item = &'a DraftEvent>,
    ) -> Self {
        let mut draft = Self::empty(id, reference);
        for event in events {
            draft.apply(event);
        }
        draft
    }

    fn empty(id: DraftId, reference: Arc<ReferenceTable>) -> Self {
        Self {
            id,
            reference,
            header: InvoiceHeader::default(),
            lines: Vec::new(),
            issued: HashSet::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> DraftId {
        self.id
    }

    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    pub fn header(&self) -> &InvoiceHeader {
        &self.header
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, line_id: LineId) -> Option<&LineItem> {
        self.lines.iter().find(|line| line.id_typed() == line_id)
    }

    /// Invariant: a draft keeps at least one line.
    pub fn can_remove_lines(&self) -> bool {
        self.lines.len() > 1
    }

    /// Totals of the current lines, recomputed on every call.
    ///
    /// Edits are never refused for size; a draft whose figures do not fit a
    /// `Decimal` reports `DomainError::OutOfRange` here until a line changes.
    pub fn totals(&self) -> DomainResult<Totals> {
        Totals::of(&self.lines)
    }

    /// Append a blank line with a freshly minted id.
    pub fn add_line(&mut self) -> LineId {
        let line_id = LineId::new();
        // A fresh UUIDv7 was never issued here, so no refusal is possible.
        self.apply(&DraftEvent::LineAdded(LineAdded { line_id }));
        line_id
    }

    pub fn remove_line(&mut self, line_id: LineId) -> Result<(), DraftRefusal> {
        self.execute(&DraftCommand::RemoveLine(RemoveLine { line_id }))
            .map(|_| ())
    }

    pub fn update_field(&mut self, line_id: LineId, edit: FieldEdit) -> Result<(), DraftRefusal> {
        self.execute(&DraftCommand::UpdateLineField(UpdateLineField { line_id, edit }))
            .map(|_| ())
    }

    pub fn update_header(&mut self, edit: HeaderEdit) -> Result<(), DraftRefusal> {
        self.execute(&DraftCommand::UpdateHeader(UpdateHeader { edit }))
            .map(|_| ())
    }

    fn line_mut(&mut self, line_id: LineId) -> Option<&mut LineItem> {
        self.lines.iter_mut().find(|line| line.id_typed() == line_id)
    }
}

impl AggregateRoot for InvoiceDraft {
    type Id = DraftId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddLine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLine {
    pub line_id: LineId,
}

/// Command: RemoveLine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLine {
    pub line_id: LineId,
}

/// Command: UpdateLineField.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLineField {
    pub line_id: LineId,
    pub edit: FieldEdit,
}

/// Command: UpdateHeader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateHeader {
    pub edit: HeaderEdit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftCommand {
    AddLine(AddLine),
    RemoveLine(RemoveLine),
    UpdateLineField(UpdateLineField),
    UpdateHeader(UpdateHeader),
}

/// Event: LineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub line_id: LineId,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub line_id: LineId,
}

/// Event: LineFieldUpdated. Classification codes have their own events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFieldUpdated {
    pub line_id: LineId,
    pub value: LineValue,
}

/// Event: ClassificationResolved. Code, rate and schedule move together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResolved {
    pub line_id: LineId,
    pub code: String,
    pub tax_rate_percent: Decimal,
    pub schedule_reference: String,
}

/// Event: ClassificationUnresolved. The code is not in the reference table;
/// the line keeps its previous tax metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationUnresolved {
    pub line_id: LineId,
    pub code: String,
}

/// Event: HeaderUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderUpdated {
    pub edit: HeaderEdit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftEvent {
    LineAdded(LineAdded),
    LineRemoved(LineRemoved),
    LineFieldUpdated(LineFieldUpdated),
    ClassificationResolved(ClassificationResolved),
    ClassificationUnresolved(ClassificationUnresolved),
    HeaderUpdated(HeaderUpdated),
}

impl Event for DraftEvent {
    fn event_type(&self) -> &'static str {
        match self {
            DraftEvent::LineAdded(_) => "invoicing.draft.line_added",
            DraftEvent::LineRemoved(_) => "invoicing.draft.line_removed",
            DraftEvent::LineFieldUpdated(_) => "invoicing.draft.line_field_updated",
            DraftEvent::ClassificationResolved(_) => "invoicing.draft.classification_resolved",
            DraftEvent::ClassificationUnresolved(_) => "invoicing.draft.classification_unresolved",
            DraftEvent::HeaderUpdated(_) => "invoicing.draft.header_updated",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for InvoiceDraft {
    type Command = DraftCommand;
    type Event = DraftEvent;
    type Error = DraftRefusal;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            DraftEvent::LineAdded(e) => {
                self.issued.insert(e.line_id);
                self.lines.push(LineItem::blank(e.line_id));
            }
            DraftEvent::LineRemoved(e) => {
                self.lines.retain(|line| line.id_typed() != e.line_id);
            }
            DraftEvent::LineFieldUpdated(e) => {
                if let Some(line) = self.line_mut(e.line_id) {
                    line.set_field(&e.value);
                }
            }
            DraftEvent::ClassificationResolved(e) => {
                if let Some(line) = self.line_mut(e.line_id) {
                    line.set_classification(&e.code, e.tax_rate_percent, &e.schedule_reference);
                }
            }
            DraftEvent::ClassificationUnresolved(e) => {
                if let Some(line) = self.line_mut(e.line_id) {
                    line.set_unresolved_code(&e.code);
                }
            }
            DraftEvent::HeaderUpdated(e) => {
                self.header.apply_edit(&e.edit);
            }
        }

        // +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let outcome = match command {
            DraftCommand::AddLine(cmd) => self.handle_add_line(cmd),
            DraftCommand::RemoveLine(cmd) => self.handle_remove_line(cmd),
            DraftCommand::UpdateLineField(cmd) => self.handle_update_field(cmd),
            DraftCommand::UpdateHeader(cmd) => Ok(self.handle_update_header(cmd)),
        };
        if let Err(refusal) = &outcome {
            tracing::debug!(draft_id = %self.id, %refusal, "draft command refused");
        }
        outcome
    }
}

impl InvoiceDraft {
    fn ensure_line(&self, line_id: LineId) -> Result<(), DraftRefusal> {
        if self.line(line_id).is_none() {
            return Err(DraftRefusal::UnknownLine(line_id));
        }
        Ok(())
    }

    fn handle_add_line(&self, cmd: &AddLine) -> Result<Vec<DraftEvent>, DraftRefusal> {
        if self.issued.contains(&cmd.line_id) {
            return Err(DraftRefusal::DuplicateLine(cmd.line_id));
        }
        Ok(vec![DraftEvent::LineAdded(LineAdded {
            line_id: cmd.line_id,
        })])
    }

    fn handle_remove_line(&self, cmd: &RemoveLine) -> Result<Vec<DraftEvent>, DraftRefusal> {
        self.ensure_line(cmd.line_id)?;
        if !self.can_remove_lines() {
            return Err(DraftRefusal::CannotRemoveLastLine);
        }
        Ok(vec![DraftEvent::LineRemoved(LineRemoved {
            line_id: cmd.line_id,
        })])
    }

    fn handle_update_field(&self, cmd: &UpdateLineField) -> Result<Vec<DraftEvent>, DraftRefusal> {
        self.ensure_line(cmd.line_id)?;

        let FieldEdit::ClassificationCode(code) = &cmd.edit else {
            return Ok(cmd
                .edit
                .as_value()
                .map(|value| {
                    DraftEvent::LineFieldUpdated(LineFieldUpdated {
                        line_id: cmd.line_id,
                        value,
                    })
                })
                .into_iter()
                .collect());
        };

        let event = match self.reference.lookup(code) {
            Some(entry) => {
                tracing::debug!(
                    line_id = %cmd.line_id,
                    code = %entry.code,
                    tax_rate_percent = %entry.tax_rate_percent,
                    "classification resolved"
                );
                DraftEvent::ClassificationResolved(ClassificationResolved {
                    line_id: cmd.line_id,
                    code: entry.code.clone(),
                    tax_rate_percent: entry.tax_rate_percent,
                    schedule_reference: entry.schedule_reference.clone(),
                })
            }
            None => {
                tracing::debug!(
                    line_id = %cmd.line_id,
                    code = %code,
                    "classification not in reference table; keeping previous tax metadata"
                );
                DraftEvent::ClassificationUnresolved(ClassificationUnresolved {
                    line_id: cmd.line_id,
                    code: code.clone(),
                })
            }
        };
        Ok(vec![event])
    }

    fn handle_update_header(&self, cmd: &UpdateHeader) -> Vec<DraftEvent> {
        if !self.header.accepts(&cmd.edit) {
            return Vec::new();
        }
        vec![DraftEvent::HeaderUpdated(HeaderUpdated {
            edit: cmd.edit.clone(),
        })]
    }
}
