pub mod cli;
pub mod report;

pub use cli::{build_cli_command, Cli, ReportFormat, TableArg};
