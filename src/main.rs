use std::io::IsTerminal as _;

use color_eyre::eyre::OptionExt as _;
use csv::ReaderBuilder;
use csv::Trim;
use minibank::ledger::Ledger;
use minibank::operation::Operation;
use tracing_subscriber::EnvFilter;

mod csv_report;

const DEFAULT_LOG_DIRECTIVE: &str = "warn";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let ops_file_path = std::env::args().nth(1).ok_or_eyre("no operations CSV supplied")?;

    let mut ops_file_reader = ReaderBuilder::new().trim(Trim::All).from_path(ops_file_path)?;

    let mut ledger = Ledger::new();
    let mut failed_ops = 0_usize;

    for op_res in ops_file_reader.deserialize::<Operation>() {
        let op = match op_res {
            Ok(op) => op,
            Err(error) => {
                tracing::error!(%error, "failed to deserialize operation");
                failed_ops += 1;
                continue;
            }
        };

        let op_repr = op.to_string();
        if let Err(error) = op.apply(&mut ledger) {
            tracing::error!(op = %op_repr, %error, "failed to apply operation");
            failed_ops += 1;
        }
    }

    let report_errors = csv_report::write_to_stdout(&ledger);
    for error in &report_errors {
        tracing::error!(%error, "failed to write report");
    }

    if failed_ops > 0 || !report_errors.is_empty() {
        tracing::warn!(failed_ops, report_errors = report_errors.len(), "completed with errors");
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
