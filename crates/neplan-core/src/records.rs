//! Output record types and the table bundle produced by one conversion.
//!
//! Field order of each struct is the CSV column order; [`TableRecord::COLUMNS`]
//! repeats it so writers can emit a header even for empty tables. Nullable
//! source values stay `Option` and serialize as empty cells.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A record kind that is written as one output table.
pub trait TableRecord: Serialize {
    const KIND: TableKind;
    const COLUMNS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub name: Option<String>,
    pub bus0: String,
    pub bus1: String,
    pub length: Option<f64>,
    pub num_parallel: Option<f64>,
    pub type_info: Option<String>,
    /// Total resistance (resistance per length times length)
    pub r: Option<f64>,
    /// Total reactance (reactance per length times length)
    pub x: Option<f64>,
    /// Rated apparent power, `sqrt(3) * I_r * U_r`
    pub s_nom: Option<f64>,
    pub kind: String,
}

impl TableRecord for LineRecord {
    const KIND: TableKind = TableKind::Lines;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "bus0",
        "bus1",
        "length",
        "num_parallel",
        "type_info",
        "r",
        "x",
        "s_nom",
        "kind",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchRecord {
    pub name: Option<String>,
    pub bus_open: Option<String>,
    pub bus_closed: Option<String>,
    pub type_info: String,
    /// Left empty; resolved against the line table by downstream tools.
    pub branch: String,
}

impl TableRecord for SwitchRecord {
    const KIND: TableKind = TableKind::Switches;
    const COLUMNS: &'static [&'static str] =
        &["name", "bus_open", "bus_closed", "type_info", "branch"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub name: Option<String>,
    pub control: Option<String>,
    pub x: String,
    pub y: String,
    pub mv_grid_id: String,
    pub lv_grid_id: String,
    pub in_building: String,
    pub v_nom: f64,
}

impl BusRecord {
    /// Bus with empty placeholder fields.
    pub fn new(name: Option<String>, control: Option<String>, v_nom: f64) -> Self {
        Self {
            name,
            control,
            x: String::new(),
            y: String::new(),
            mv_grid_id: String::new(),
            lv_grid_id: String::new(),
            in_building: String::new(),
            v_nom,
        }
    }
}

impl TableRecord for BusRecord {
    const KIND: TableKind = TableKind::Buses;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "control",
        "x",
        "y",
        "mv_grid_id",
        "lv_grid_id",
        "in_building",
        "v_nom",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    pub name: Option<String>,
    pub bus: Option<String>,
    pub peak_load: Option<f64>,
    pub annual_consumption: String,
    pub sector: String,
}

impl LoadRecord {
    pub fn new(name: Option<String>, bus: Option<String>, peak_load: Option<f64>) -> Self {
        Self {
            name,
            bus,
            peak_load,
            annual_consumption: String::new(),
            sector: String::new(),
        }
    }
}

impl TableRecord for LoadRecord {
    const KIND: TableKind = TableKind::Loads;
    const COLUMNS: &'static [&'static str] =
        &["name", "bus", "peak_load", "annual_consumption", "sector"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorRecord {
    pub name: Option<String>,
    pub bus: Option<String>,
    pub p_nom: Option<f64>,
    pub control: String,
    #[serde(rename = "type")]
    pub gen_type: String,
    pub subtype: String,
    pub weather_cell_id: String,
}

impl GeneratorRecord {
    pub fn new(
        name: Option<String>,
        bus: Option<String>,
        p_nom: Option<f64>,
        control: impl Into<String>,
    ) -> Self {
        Self {
            name,
            bus,
            p_nom,
            control: control.into(),
            gen_type: String::new(),
            subtype: String::new(),
            weather_cell_id: String::new(),
        }
    }
}

impl TableRecord for GeneratorRecord {
    const KIND: TableKind = TableKind::Generators;
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "bus",
        "p_nom",
        "control",
        "type",
        "subtype",
        "weather_cell_id",
    ];
}

/// Identifies one of the five output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Lines,
    Switches,
    Buses,
    Loads,
    Generators,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Lines,
        TableKind::Switches,
        TableKind::Buses,
        TableKind::Loads,
        TableKind::Generators,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Lines => "lines",
            TableKind::Switches => "switches",
            TableKind::Buses => "buses",
            TableKind::Loads => "loads",
            TableKind::Generators => "generators",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.as_str())
    }

    /// Tables sourced from the element file.
    pub fn is_element_table(self) -> bool {
        matches!(self, TableKind::Lines | TableKind::Switches)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of tables a conversion should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSet(BTreeSet<TableKind>);

impl TableSet {
    pub fn all() -> Self {
        Self(TableKind::ALL.into_iter().collect())
    }

    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    pub fn with(mut self, kind: TableKind) -> Self {
        self.0.insert(kind);
        self
    }

    pub fn without(mut self, kind: TableKind) -> Self {
        self.0.remove(&kind);
        self
    }

    pub fn contains(&self, kind: TableKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TableKind> + '_ {
        self.0.iter().copied()
    }

    pub fn needs_element_file(&self) -> bool {
        self.iter().any(TableKind::is_element_table)
    }

    pub fn needs_node_file(&self) -> bool {
        self.iter().any(|kind| !kind.is_element_table())
    }
}

impl Default for TableSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<TableKind> for TableSet {
    fn from_iter<I: IntoIterator<Item = TableKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The five tables of one conversion run. Tables that were not requested
/// stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridTables {
    pub lines: Vec<LineRecord>,
    pub switches: Vec<SwitchRecord>,
    pub buses: Vec<BusRecord>,
    pub loads: Vec<LoadRecord>,
    pub generators: Vec<GeneratorRecord>,
}

impl GridTables {
    pub fn len_of(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Lines => self.lines.len(),
            TableKind::Switches => self.switches.len(),
            TableKind::Buses => self.buses.len(),
            TableKind::Loads => self.loads.len(),
            TableKind::Generators => self.generators.len(),
        }
    }

    /// Empty every table not in `tables`.
    pub fn retain(&mut self, tables: &TableSet) {
        for kind in TableKind::ALL {
            if tables.contains(kind) {
                continue;
            }
            match kind {
                TableKind::Lines => self.lines.clear(),
                TableKind::Switches => self.switches.clear(),
                TableKind::Buses => self.buses.clear(),
                TableKind::Loads => self.loads.clear(),
                TableKind::Generators => self.generators.clear(),
            }
        }
    }
}
