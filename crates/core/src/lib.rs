//! `taxinvoice-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the reference-data
//! and invoicing crates (no IO, no logging setup, no presentation).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{DraftId, LineId};
pub use money::{format_amount, percent_of, round_for_display};
pub use value_object::ValueObject;
