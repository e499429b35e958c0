//! NEPLAN node file (`.ndt`) parser
//!
//! The node file mixes three record kinds in one layout, told apart only by
//! the sign of the two power magnitudes:
//!
//! | Kind | Rule |
//! |------|------|
//! | Load | either magnitude strictly positive |
//! | Generator | otherwise, either magnitude strictly negative |
//! | Bus | everything else, including zero/zero and null rows |
//!
//! This sign rule is a business rule of the NEPLAN exports and is kept as is.
//! A row with one positive and one negative magnitude is a load.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use neplan_core::{BusRecord, ConvertError, ConverterConfig, GeneratorRecord, LoadRecord};
use tracing::{debug, info};

use crate::helpers::ConversionDiagnostics;
use crate::power::{convert_power, PowerRole};
use crate::raw::{RawRow, RawTable};
use crate::validate::validate_bus_references;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Bus,
    Load,
    Generator,
}

/// Classify a node row by the sign of its power magnitudes.
pub fn classify_node(magnitude1: Option<f64>, magnitude2: Option<f64>) -> NodeClass {
    let magnitudes = [magnitude1, magnitude2];
    if magnitudes.iter().flatten().any(|m| *m > 0.0) {
        NodeClass::Load
    } else if magnitudes.iter().flatten().any(|m| *m < 0.0) {
        NodeClass::Generator
    } else {
        NodeClass::Bus
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTables {
    pub buses: Vec<BusRecord>,
    pub loads: Vec<LoadRecord>,
    pub generators: Vec<GeneratorRecord>,
}

/// Read, convert and validate a node file.
pub fn read_node_file(
    path: &Path,
    config: &ConverterConfig,
    diag: &mut ConversionDiagnostics,
) -> Result<NodeTables> {
    debug!("reading node file {}", path.display());
    let table = RawTable::read(path, &config.translations.node_numeric_columns())?;
    parse_node_table(&table, config, diag)
        .with_context(|| format!("converting node file '{}'", path.display()))
}

/// Convert and validate an already loaded node table.
pub fn parse_node_table(
    table: &RawTable,
    config: &ConverterConfig,
    diag: &mut ConversionDiagnostics,
) -> Result<NodeTables> {
    let fields = &config.translations;
    fields.validate()?;
    table.require_columns(&fields.node_columns())?;

    let mut bus_rows = Vec::new();
    let mut load_rows = Vec::new();
    let mut generator_rows = Vec::new();

    for row in table.rows() {
        // Load and generator layouts share their magnitude columns.
        let m1 = row.number(&fields.load.magnitude1);
        let m2 = row.number(&fields.load.magnitude2);
        match classify_node(m1, m2) {
            NodeClass::Load => {
                if m1.zip(m2).is_some_and(|(a, b)| a * b < 0.0) {
                    diag.add_warning_at_line(
                        "classification",
                        "power magnitudes of mixed sign; classified as load",
                        row.line(),
                        &describe("node", row.text(&fields.load.name)),
                    );
                }
                load_rows.push(row);
            }
            NodeClass::Generator => generator_rows.push(row),
            NodeClass::Bus => bus_rows.push(row),
        }
    }

    let loads = load_rows
        .iter()
        .map(|row| load_from_row(row, config))
        .collect::<Result<Vec<_>, _>>()?;
    let generators = generator_rows
        .iter()
        .map(|row| generator_from_row(row, config))
        .collect::<Result<Vec<_>, _>>()?;
    let buses: Vec<BusRecord> = bus_rows.iter().map(|row| bus_from_row(row, config)).collect();

    report_duplicate_buses(&bus_rows, &buses, diag);
    validate_bus_references(&buses, &loads, &generators)?;

    diag.stats.node_rows += table.len();
    diag.stats.buses += buses.len();
    diag.stats.loads += loads.len();
    diag.stats.generators += generators.len();

    info!(
        buses = buses.len(),
        loads = loads.len(),
        generators = generators.len(),
        "node file converted"
    );
    Ok(NodeTables {
        buses,
        loads,
        generators,
    })
}

fn bus_from_row(row: &RawRow, config: &ConverterConfig) -> BusRecord {
    let fields = &config.translations.bus;
    let control = row
        .text(&fields.control)
        .map(|code| config.control_modes.remap(code));
    BusRecord::new(
        row.text_owned(&fields.name),
        control,
        config.nominal_voltage_kv,
    )
}

fn load_from_row(row: &RawRow, config: &ConverterConfig) -> Result<LoadRecord, ConvertError> {
    let fields = &config.translations.load;
    let name = row.text_owned(&fields.name);
    let peak_load = convert_power(
        PowerRole::Load,
        row.text(&fields.encoding),
        row.number(&fields.magnitude1),
        row.number(&fields.magnitude2),
        &describe("load", name.as_deref()),
    )?;
    Ok(LoadRecord::new(name, row.text_owned(&fields.bus), peak_load))
}

fn generator_from_row(
    row: &RawRow,
    config: &ConverterConfig,
) -> Result<GeneratorRecord, ConvertError> {
    let fields = &config.translations.generator;
    let name = row.text_owned(&fields.name);
    let p_nom = convert_power(
        PowerRole::Generator,
        row.text(&fields.encoding),
        row.number(&fields.magnitude1),
        row.number(&fields.magnitude2),
        &describe("generator", name.as_deref()),
    )?;
    Ok(GeneratorRecord::new(
        name,
        row.text_owned(&fields.bus),
        p_nom,
        config.generator_control.as_str(),
    ))
}

fn report_duplicate_buses(rows: &[&RawRow], buses: &[BusRecord], diag: &mut ConversionDiagnostics) {
    let mut seen = HashSet::new();
    for (row, bus) in rows.iter().zip(buses) {
        if let Some(name) = bus.name.as_deref() {
            if !seen.insert(name) {
                diag.add_warning_at_line(
                    "bus",
                    "duplicate bus name",
                    row.line(),
                    &describe("bus", Some(name)),
                );
            }
        }
    }
}

fn describe(kind: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{kind} '{name}'"),
        None => format!("unnamed {kind}"),
    }
}
