//! Driver for the invoice drafting engine: environment configuration and a
//! replayable script of form edits.

pub mod config;
pub mod script;

pub use config::CliConfig;
pub use script::{read_script, run_script, DisplayTotals, RejectedStep, ScriptReport, ScriptStep};
