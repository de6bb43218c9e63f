//! JSON loading for externally supplied reference tables.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use taxinvoice_core::DomainError;

use crate::classification::ClassificationEntry;
use crate::table::ReferenceTable;

/// Failure to load a reference table from an external source.
#[derive(Debug, Error)]
pub enum ReferenceLoadError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed reference data: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Load a table from a JSON array of classification entries.
pub fn load_json<R: Read>(reader: R) -> Result<ReferenceTable, ReferenceLoadError> {
    let entries: Vec<ClassificationEntry> = serde_json::from_reader(reader)?;
    let table = ReferenceTable::from_entries(entries)?;
    tracing::debug!(entries = table.len(), "reference table loaded");
    Ok(table)
}

pub fn load_json_str(json: &str) -> Result<ReferenceTable, ReferenceLoadError> {
    load_json(json.as_bytes())
}

pub fn load_json_file(path: impl AsRef<Path>) -> Result<ReferenceTable, ReferenceLoadError> {
    let file = File::open(path.as_ref())?;
    load_json(BufReader::new(file))
}
