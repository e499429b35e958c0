//! CSV export of converted tables.
//!
//! One file per table, named after the table (`lines.csv`, ...). The header
//! is written from [`TableRecord::COLUMNS`] so empty tables still carry
//! their schema; null values become empty cells.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use neplan_core::{GridTables, TableKind, TableRecord, TableSet};
use tracing::info;

/// Write every table in `selection` into `dir`, creating it if needed.
/// Returns the written paths in table order.
pub fn write_tables_csv(tables: &GridTables, selection: &TableSet, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating CSV output directory '{}'", dir.display()))?;

    let mut written = Vec::new();
    for kind in selection.iter() {
        let path = dir.join(kind.file_name());
        match kind {
            TableKind::Lines => write_csv(&path, &tables.lines)?,
            TableKind::Switches => write_csv(&path, &tables.switches)?,
            TableKind::Buses => write_csv(&path, &tables.buses)?,
            TableKind::Loads => write_csv(&path, &tables.loads)?,
            TableKind::Generators => write_csv(&path, &tables.generators)?,
        }
        info!(table = %kind, rows = tables.len_of(kind), "wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Write one table to `path`.
pub fn write_csv<T: TableRecord>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating CSV writer for {}", path.display()))?;

    wtr.write_record(T::COLUMNS)
        .with_context(|| format!("writing {} CSV header", T::KIND))?;
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("writing {} CSV record", T::KIND))?;
    }

    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}
