//! Environment configuration.

use std::path::PathBuf;

use anyhow::Context;

use taxinvoice_observability::LogFormat;
use taxinvoice_reference::{hs_code_master, load_json_file, ReferenceTable};

/// Path to a JSON reference table; the built-in master list is used when unset.
pub const HS_CODES_VAR: &str = "TAXINVOICE_HS_CODES";
/// `json` (default) or `pretty`.
pub const LOG_FORMAT_VAR: &str = "TAXINVOICE_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliConfig {
    pub hs_codes_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let hs_codes_path = lookup(HS_CODES_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            hs_codes_path,
            log_format,
        })
    }

    pub fn load_reference(&self) -> anyhow::Result<ReferenceTable> {
        let Some(path) = &self.hs_codes_path else {
            tracing::info!("using built-in HS code master list");
            return Ok(hs_code_master());
        };

        let table = load_json_file(path)
            .with_context(|| format!("loading reference table from {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = table.len(), "reference table loaded");
        Ok(table)
    }
}
