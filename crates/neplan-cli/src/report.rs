use std::io::{self, Write};

use anyhow::Result;
use neplan_io::{ConversionDiagnostics, ConversionSummary, Severity};
use serde_json::json;
use tabwriter::TabWriter;

use crate::cli::ReportFormat;

pub fn print_report(
    summary: &ConversionSummary,
    diagnostics: &ConversionDiagnostics,
    format: ReportFormat,
) -> Result<()> {
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), summary, diagnostics, format)
}

pub fn write_report<W: Write>(
    out: &mut W,
    summary: &ConversionSummary,
    diagnostics: &ConversionDiagnostics,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Plain => write_plain(out, summary, diagnostics),
        ReportFormat::Json => {
            let report = json!({ "summary": summary, "diagnostics": diagnostics });
            serde_json::to_writer_pretty(&mut *out, &report)
                .map_err(|err| anyhow::anyhow!("serializing report to JSON: {err}"))?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_plain<W: Write>(
    out: &mut W,
    summary: &ConversionSummary,
    diagnostics: &ConversionDiagnostics,
) -> Result<()> {
    {
        let mut writer = TabWriter::new(&mut *out);
        writeln!(writer, "Total lines\t{}", summary.total_lines)?;
        writeln!(
            writer,
            "Lines with both buses\t{}",
            summary.lines_with_both_buses
        )?;
        writeln!(writer, "Lines with nonzero s_nom\t{}", summary.lines_with_rating)?;
        writeln!(writer, "Total buses\t{}", summary.total_buses)?;
        writeln!(writer, "Unique buses\t{}", summary.unique_buses)?;
        writeln!(writer, "Unnamed buses\t{}", summary.unnamed_buses)?;
        writeln!(writer, "Skipped line segments\t{}", diagnostics.stats.segment_rows)?;
        writeln!(writer, "Ignored element rows\t{}", diagnostics.stats.ignored_rows)?;
        writer.flush()?;
    }

    if !diagnostics.issues.is_empty() {
        writeln!(out, "\nIssues:")?;
        for issue in &diagnostics.issues {
            let severity = match issue.severity {
                Severity::Info => "info",
                Severity::Warning => "warning",
            };
            let line = issue
                .line
                .map(|l| format!(" (line {l})"))
                .unwrap_or_default();
            let entity = issue.entity.as_deref().unwrap_or("-");
            writeln!(
                out,
                "  {severity:<7} [{}] {}: {}{}",
                issue.category, entity, issue.message, line
            )?;
        }
    }
    Ok(())
}
