use std::io::Write;
use std::sync::Arc;

use anyhow::Context;

use taxinvoice_cli::{read_script, run_script, CliConfig};
use taxinvoice_invoicing::{InvoiceDraft, MockSubmitter};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::from_env()?;
    taxinvoice_observability::init_with(config.log_format);

    let reference = Arc::new(config.load_reference()?);
    let steps = read_script(std::env::args_os().nth(1))?;
    tracing::info!(steps = steps.len(), "replaying script");

    let report = run_script(InvoiceDraft::start(reference), &steps, &MockSubmitter)?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &report).context("writing report")?;
    writeln!(stdout)?;
    Ok(())
}
