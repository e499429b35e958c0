//! Conversion pipeline
//!
//! Runs the element and node parsers and bundles their output into
//! [`GridTables`]. A run either returns every requested table or an error;
//! nothing is written here, output goes through [`crate::export`].

use std::path::Path;

use anyhow::Result;
use neplan_core::{ConverterConfig, GridTables, TableSet};
use tracing::debug;

use crate::element::read_element_file;
use crate::helpers::ConversionDiagnostics;
use crate::node::read_node_file;

/// Result of a conversion run
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub tables: GridTables,
    pub diagnostics: ConversionDiagnostics,
}

/// Configured converter. Holds its config by value; runs share no state.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
    tables: TableSet,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            tables: TableSet::all(),
        }
    }

    /// Restrict the run to `tables`. Files whose tables are all excluded are
    /// not read.
    pub fn with_tables(mut self, tables: TableSet) -> Self {
        self.tables = tables;
        self
    }

    pub fn run(&self, edt_path: &Path, ndt_path: &Path) -> Result<ConversionResult> {
        self.config.validate()?;
        let mut diagnostics = ConversionDiagnostics::new();
        let mut tables = GridTables::default();

        if self.tables.needs_element_file() {
            let elements = read_element_file(edt_path, &self.config, &mut diagnostics)?;
            tables.lines = elements.lines;
            tables.switches = elements.switches;
        } else {
            debug!("skipping element file {}", edt_path.display());
        }

        if self.tables.needs_node_file() {
            let nodes = read_node_file(ndt_path, &self.config, &mut diagnostics)?;
            tables.buses = nodes.buses;
            tables.loads = nodes.loads;
            tables.generators = nodes.generators;
        } else {
            debug!("skipping node file {}", ndt_path.display());
        }

        tables.retain(&self.tables);
        Ok(ConversionResult {
            tables,
            diagnostics,
        })
    }
}

/// Convert an element/node file pair with the default layout into all five
/// tables.
pub fn convert(edt_path: impl AsRef<Path>, ndt_path: impl AsRef<Path>) -> Result<GridTables> {
    Converter::default()
        .run(edt_path.as_ref(), ndt_path.as_ref())
        .map(|result| result.tables)
}
