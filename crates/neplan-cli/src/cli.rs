use clap::{CommandFactory, Parser, ValueEnum, ValueHint};
use neplan_core::{TableKind, TableSet};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "neplan-convert",
    author,
    version,
    about = "Convert NEPLAN element/node exports into grid-model CSV tables",
    long_about = None
)]
pub struct Cli {
    /// NEPLAN element file (.edt)
    #[arg(short = 'e', long, value_hint = ValueHint::FilePath)]
    pub edt: PathBuf,

    /// NEPLAN node file (.ndt)
    #[arg(short = 'n', long, value_hint = ValueHint::FilePath)]
    pub ndt: PathBuf,

    /// Directory for the CSV tables
    #[arg(long, default_value = ".", value_hint = ValueHint::DirPath)]
    pub csv_dir: PathBuf,

    /// Print a summary of the converted grid
    #[arg(short, long)]
    pub verbose: bool,

    /// Summary format in verbose mode
    #[arg(long, value_enum, default_value = "plain")]
    pub format: ReportFormat,

    /// Tables to write (comma separated); all by default
    #[arg(long, value_enum, value_delimiter = ',')]
    pub tables: Vec<TableArg>,

    /// Converter config (TOML) overriding column codes and fixed labels
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

impl Cli {
    pub fn table_set(&self) -> TableSet {
        if self.tables.is_empty() {
            TableSet::all()
        } else {
            self.tables.iter().map(|t| TableKind::from(*t)).collect()
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    Lines,
    Switches,
    Buses,
    Loads,
    Generators,
}

impl From<TableArg> for TableKind {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Lines => TableKind::Lines,
            TableArg::Switches => TableKind::Switches,
            TableArg::Buses => TableKind::Buses,
            TableArg::Loads => TableKind::Loads,
            TableArg::Generators => TableKind::Generators,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Plain,
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
