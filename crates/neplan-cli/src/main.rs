use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use neplan_cli::{report, Cli};
use neplan_core::ConverterConfig;
use neplan_io::{summarize, write_tables_csv, Converter};
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ConverterConfig::load_from(path)?,
        None => ConverterConfig::default(),
    };
    let tables = cli.table_set();

    info!(
        "Converting {} and {}",
        cli.edt.display(),
        cli.ndt.display()
    );
    let result = Converter::new(config)
        .with_tables(tables.clone())
        .run(&cli.edt, &cli.ndt)?;

    let written = write_tables_csv(&result.tables, &tables, &cli.csv_dir)
        .with_context(|| format!("writing CSV tables to '{}'", cli.csv_dir.display()))?;
    info!(
        "Wrote {} table(s) to {}",
        written.len(),
        cli.csv_dir.display()
    );

    if result.diagnostics.has_warnings() && !cli.verbose {
        warn!(
            "{} warning(s) during conversion; rerun with --verbose to list them",
            result.diagnostics.warning_count()
        );
    }

    if cli.verbose {
        report::print_report(&summarize(&result.tables), &result.diagnostics, cli.format)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    match run(&cli) {
        Ok(()) => {
            info!("Conversion successful!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Conversion failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
