//! Invoice drafting domain module (command/event driven).
//!
//! This crate contains the rules for composing a sales-tax invoice: line items
//! enriched from the classification reference table, the derived totals, the
//! invoice header, and the hand-off snapshot for submission. Pure domain logic
//! (no IO, no HTTP, no storage).

pub mod draft;
pub mod header;
pub mod line;
pub mod submission;
pub mod totals;

pub use draft::{
    AddLine, ClassificationResolved, ClassificationUnresolved, DraftCommand, DraftEvent,
    DraftRefusal, HeaderUpdated, InvoiceDraft, LineAdded, LineFieldUpdated, LineRemoved,
    RemoveLine, UpdateHeader, UpdateLineField,
};
pub use header::{
    BuyerDetails, BuyerType, HeaderEdit, InvoiceHeader, InvoiceType, PaymentMode, Province,
    SaleType, SellerProfile, UNREGISTERED_BUYER_STRN,
};
pub use line::{
    parse_non_negative, FieldEdit, LineField, LineItem, LineValue, NumericInput, UnitOfMeasure,
};
pub use submission::{
    Acknowledgement, InvoiceSubmission, MockSubmitter, SubmissionKind, SubmittedLine, Submitter,
};
pub use totals::{grand_total, line_amount, line_tax, subtotal, tax_total, Totals};
