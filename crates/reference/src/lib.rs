//! Classification reference data (HS codes with tax treatment).
//!
//! The table is loaded once, validated, and then only read. Drafts share it
//! through an `Arc`.

pub mod classification;
pub mod loader;
pub mod master;
pub mod table;

pub use classification::ClassificationEntry;
pub use loader::{load_json, load_json_file, load_json_str, ReferenceLoadError};
pub use master::hs_code_master;
pub use table::{ReferenceTable, Search};
