//! Summary figures for a converted grid, shown in verbose mode.

use std::collections::HashSet;

use neplan_core::GridTables;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub total_lines: usize,
    /// Lines whose `bus0` and `bus1` both name a bus in the bus table
    pub lines_with_both_buses: usize,
    /// Lines whose `s_nom` is not zero; an unknown rating counts as nonzero
    pub lines_with_rating: usize,
    pub total_buses: usize,
    /// Distinct bus names; all unnamed buses count as one
    pub unique_buses: usize,
    pub unnamed_buses: usize,
}

pub fn summarize(tables: &GridTables) -> ConversionSummary {
    let named: HashSet<&str> = tables
        .buses
        .iter()
        .filter_map(|b| b.name.as_deref())
        .collect();
    let unnamed_buses = tables.buses.iter().filter(|b| b.name.is_none()).count();

    ConversionSummary {
        total_lines: tables.lines.len(),
        lines_with_both_buses: tables
            .lines
            .iter()
            .filter(|line| named.contains(line.bus0.as_str()) && named.contains(line.bus1.as_str()))
            .count(),
        lines_with_rating: tables
            .lines
            .iter()
            .filter(|line| line.s_nom != Some(0.0))
            .count(),
        total_buses: tables.buses.len(),
        unique_buses: named.len() + usize::from(unnamed_buses > 0),
        unnamed_buses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neplan_core::{BusRecord, LineRecord};

    fn line(bus0: &str, bus1: &str, s_nom: Option<f64>) -> LineRecord {
        LineRecord {
            name: None,
            bus0: bus0.to_string(),
            bus1: bus1.to_string(),
            length: None,
            num_parallel: None,
            type_info: None,
            r: None,
            x: None,
            s_nom,
            kind: String::new(),
        }
    }

    fn bus(name: Option<&str>) -> BusRecord {
        BusRecord::new(name.map(str::to_string), None, 10.0)
    }

    #[test]
    fn counts_lines_and_buses() {
        let tables = GridTables {
            lines: vec![
                line("K1", "K2", Some(86.6)),
                line("K2", "K9", Some(0.0)),
                line("K1", "K1", None),
            ],
            buses: vec![bus(Some("K1")), bus(Some("K2")), bus(Some("K2")), bus(None)],
            ..GridTables::default()
        };
        let summary = summarize(&tables);
        assert_eq!(
            summary,
            ConversionSummary {
                total_lines: 3,
                lines_with_both_buses: 2,
                lines_with_rating: 2,
                total_buses: 4,
                unique_buses: 3,
                unnamed_buses: 1,
            }
        );
    }

    #[test]
    fn unknown_rating_counts_as_rated() {
        let tables = GridTables {
            lines: vec![line("K1", "K2", None), line("K2", "K3", Some(0.0))],
            ..GridTables::default()
        };
        assert_eq!(summarize(&tables).lines_with_rating, 1);
    }

    #[test]
    fn empty_tables_summarize_to_zero() {
        assert_eq!(summarize(&GridTables::default()), ConversionSummary::default());
    }
}
