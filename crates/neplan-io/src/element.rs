//! NEPLAN element file (`.edt`) parser
//!
//! Element rows carry a record-kind discriminator. Kind `1` rows are line
//! segments; only rows with both endpoint buses set describe an entire line,
//! the others are sub-segments of a line that is already counted. Kinds `8`
//! and `9` are switches. Every other kind (transformers, couplings, ...) is
//! outside the exported model and ignored.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use neplan_core::{ConverterConfig, LineRecord, SwitchRecord};
use tracing::{debug, info};

use crate::helpers::{safe_f64_to_i32, ConversionDiagnostics};
use crate::raw::{RawRow, RawTable};

const PHASE_FACTOR: f64 = 1.732_050_807_568_877_2; // sqrt(3)

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Line,
    Switch,
}

impl ElementKind {
    pub fn from_discriminator(code: i32) -> Option<Self> {
        match code {
            1 => Some(ElementKind::Line),
            8 | 9 => Some(ElementKind::Switch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementTables {
    pub lines: Vec<LineRecord>,
    pub switches: Vec<SwitchRecord>,
}

/// Read and convert an element file.
pub fn read_element_file(
    path: &Path,
    config: &ConverterConfig,
    diag: &mut ConversionDiagnostics,
) -> Result<ElementTables> {
    debug!("reading element file {}", path.display());
    let table = RawTable::read(path, &config.translations.element_numeric_columns())?;
    parse_element_table(&table, config, diag)
        .with_context(|| format!("converting element file '{}'", path.display()))
}

/// Convert an already loaded element table.
pub fn parse_element_table(
    table: &RawTable,
    config: &ConverterConfig,
    diag: &mut ConversionDiagnostics,
) -> Result<ElementTables> {
    let fields = &config.translations;
    fields.validate()?;
    table.require_columns(&fields.element_columns())?;

    let mut tables = ElementTables::default();
    let mut ignored: BTreeMap<Option<i32>, usize> = BTreeMap::new();

    for row in table.rows() {
        let code = match row.number(&fields.discriminator) {
            Some(value) => Some(safe_f64_to_i32(value).with_context(|| {
                format!(
                    "column '{}' on line {}: invalid record kind",
                    fields.discriminator,
                    row.line()
                )
            })?),
            None => None,
        };

        match code.and_then(ElementKind::from_discriminator) {
            Some(ElementKind::Line) => match line_from_row(row, config) {
                Some(line) => tables.lines.push(line),
                None => diag.add_segment_at_line(
                    "line segment without both endpoint buses skipped",
                    row.line(),
                ),
            },
            Some(ElementKind::Switch) => tables.switches.push(switch_from_row(row, config)),
            None => *ignored.entry(code).or_default() += 1,
        }
    }

    for (code, count) in &ignored {
        let kind = code.map_or_else(|| "empty".to_string(), |c| c.to_string());
        diag.add_info(
            "discriminator",
            &format!("ignored {count} element row(s) with record kind {kind}"),
        );
    }

    diag.stats.element_rows += table.len();
    diag.stats.lines += tables.lines.len();
    diag.stats.switches += tables.switches.len();
    diag.stats.ignored_rows += ignored.values().sum::<usize>();

    info!(
        lines = tables.lines.len(),
        switches = tables.switches.len(),
        "element file converted"
    );
    Ok(tables)
}

/// Build an entire line, or `None` for a segment row.
fn line_from_row(row: &RawRow, config: &ConverterConfig) -> Option<LineRecord> {
    let fields = &config.translations.line;
    let bus0 = row.text_owned(&fields.bus0)?;
    let bus1 = row.text_owned(&fields.bus1)?;

    let length = row.number(&fields.length);
    let r = product(row.number(&fields.resistance_per_length), length);
    let x = product(row.number(&fields.reactance_per_length), length);
    let s_nom = product(row.number(&fields.rated_current), row.number(&fields.rated_voltage))
        .map(|ui| PHASE_FACTOR * ui);

    Some(LineRecord {
        name: row.text_owned(&fields.name),
        bus0,
        bus1,
        length,
        num_parallel: row.number(&fields.num_parallel),
        type_info: row.text_owned(&fields.type_info),
        r,
        x,
        s_nom,
        kind: String::new(),
    })
}

fn switch_from_row(row: &RawRow, config: &ConverterConfig) -> SwitchRecord {
    let fields = &config.translations.switch;
    SwitchRecord {
        name: row.text_owned(&fields.name),
        bus_open: row.text_owned(&fields.bus_open),
        bus_closed: row.text_owned(&fields.bus_closed),
        type_info: config.switch_type_info.clone(),
        branch: String::new(),
    }
}

fn product(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    a.zip(b).map(|(a, b)| a * b)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id\tc1\tc2\tc4\tc6\tr1\tr7\tr8\tr11\tr15\tr20\n";

    fn numeric_columns() -> Vec<&'static str> {
        vec!["id", "r20", "r15", "r1", "r7", "r8", "r11"]
    }

    fn parse(rows: &str) -> (ElementTables, ConversionDiagnostics) {
        let data = format!("{HEADER}{rows}");
        let table = RawTable::from_bytes(data.as_bytes(), &numeric_columns()).unwrap();
        let mut diag = ConversionDiagnostics::new();
        let tables = parse_element_table(&table, &ConverterConfig::default(), &mut diag).unwrap();
        (tables, diag)
    }

    #[test]
    fn full_line_derives_impedance_and_rating() {
        let (tables, _) = parse("1\tK1\tK2\tL1\tNA2XS2Y\t10,0\t5,0\t0,02\t0,01\t2\t100\n");
        assert_eq!(tables.lines.len(), 1);
        let line = &tables.lines[0];
        assert_eq!(line.name.as_deref(), Some("L1"));
        assert_eq!(line.bus0, "K1");
        assert_eq!(line.bus1, "K2");
        assert_eq!(line.length, Some(100.0));
        assert_eq!(line.num_parallel, Some(2.0));
        assert_eq!(line.type_info.as_deref(), Some("NA2XS2Y"));
        assert!((line.r.unwrap() - 1.0).abs() < 1e-9);
        assert!((line.x.unwrap() - 2.0).abs() < 1e-9);
        assert!((line.s_nom.unwrap() - 3f64.sqrt() * 50.0).abs() < 1e-9);
        assert!((line.s_nom.unwrap() - 86.60).abs() < 0.01);
        assert_eq!(line.kind, "");
    }

    #[test]
    fn segment_rows_are_dropped() {
        let (tables, diag) = parse(
            "1\tK1\tK2\tL1\t\t10\t5\t0,02\t0,01\t1\t100\n\
             1\tK2\t\tL1\t\t10\t5\t0,02\t0,01\t1\t40\n\
             1\t\tK3\tL1\t\t10\t5\t0,02\t0,01\t1\t60\n",
        );
        assert_eq!(tables.lines.len(), 1);
        assert_eq!(diag.stats.segment_rows, 2);
        assert_eq!(diag.issues[0].line, Some(3));
    }

    #[test]
    fn switches_get_fixed_label_and_empty_branch() {
        let (tables, _) = parse(
            "8\tK1\tK2\tS1\t\t\t\t\t\t\t\n\
             9\tK2\t\tS2\t\t\t\t\t\t\t\n",
        );
        assert!(tables.lines.is_empty());
        assert_eq!(tables.switches.len(), 2);
        assert_eq!(tables.switches[0].type_info, "Switch Disconnector");
        assert_eq!(tables.switches[0].branch, "");
        assert_eq!(tables.switches[1].bus_open.as_deref(), Some("K2"));
        assert_eq!(tables.switches[1].bus_closed, None);
    }

    #[test]
    fn unknown_kinds_are_ignored_and_counted() {
        let (tables, diag) = parse(
            "2\tK1\tK2\tT1\t\t\t\t\t\t\t\n\
             2\tK3\tK4\tT2\t\t\t\t\t\t\t\n\
             \tK3\tK4\tX\t\t\t\t\t\t\t\n",
        );
        assert!(tables.lines.is_empty());
        assert!(tables.switches.is_empty());
        assert_eq!(diag.stats.ignored_rows, 3);
        assert_eq!(diag.stats.element_rows, 3);
        assert!(diag
            .issues
            .iter()
            .any(|i| i.message.contains("2 element row(s) with record kind 2")));
    }

    #[test]
    fn missing_operand_gives_null_derived_value() {
        let (tables, _) = parse("1\tK1\tK2\tL1\t\t10\t\t0,02\t0,01\t1\t100\n");
        let line = &tables.lines[0];
        assert_eq!(line.s_nom, None);
        assert!(line.r.is_some());
    }

    #[test]
    fn zero_rated_current_gives_zero_rating() {
        let (tables, _) = parse("1\tK1\tK2\tL1\t\t10\t0\t0,02\t0,01\t1\t100\n");
        assert_eq!(tables.lines[0].s_nom, Some(0.0));
    }

    #[test]
    fn missing_translated_column_is_reported() {
        let data = "id\tc1\tc2\tc4\tc6\tr1\tr8\tr11\tr15\tr20\n";
        let table = RawTable::from_bytes(data.as_bytes(), &numeric_columns()).unwrap();
        let mut diag = ConversionDiagnostics::new();
        let err = parse_element_table(&table, &ConverterConfig::default(), &mut diag).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<neplan_core::ConvertError>(),
            Some(neplan_core::ConvertError::MissingColumn { column }) if column == "r7"
        ));
    }

    #[test]
    fn fractional_discriminator_is_rejected() {
        let data = format!("{HEADER}1,5\tK1\tK2\tL1\t\t\t\t\t\t\t\n");
        let table = RawTable::from_bytes(data.as_bytes(), &numeric_columns()).unwrap();
        let mut diag = ConversionDiagnostics::new();
        assert!(parse_element_table(&table, &ConverterConfig::default(), &mut diag).is_err());
    }

    #[test]
    fn unused_measurement_column_may_hold_text() {
        let data = "id\tc1\tc2\tc4\tc6\tr1\tr7\tr8\tr9\tr11\tr15\tr20\n\
                    1\tK1\tK2\tL1\t\t10\t5\t0,02\tn/a\t0,01\t2\t100\n";
        let config = ConverterConfig::default();
        let table =
            RawTable::from_bytes(data.as_bytes(), &config.translations.element_numeric_columns())
                .unwrap();
        let mut diag = ConversionDiagnostics::new();
        let tables = parse_element_table(&table, &config, &mut diag).unwrap();
        assert_eq!(tables.lines.len(), 1);
        assert!((tables.lines[0].r.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn discriminator_maps_to_kinds() {
        assert_eq!(ElementKind::from_discriminator(1), Some(ElementKind::Line));
        assert_eq!(ElementKind::from_discriminator(8), Some(ElementKind::Switch));
        assert_eq!(ElementKind::from_discriminator(9), Some(ElementKind::Switch));
        assert_eq!(ElementKind::from_discriminator(2), None);
    }
}
