//! Field translation tables for the NEPLAN element and node layouts.
//!
//! NEPLAN exports address every value by an opaque column code: text columns
//! are `c1..cN`, numeric columns `r1..rN`, and element rows carry an integer
//! discriminator in `id`. These tables are the only place where column codes
//! are named; parsers look every field up through them.
//!
//! The tables are versioned. Version 1 is the layout of the 10 kV exports the
//! converter was built against.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Layout version understood by this build.
pub const TRANSLATION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTranslations {
    pub version: u32,
    /// Record-kind column of the element file
    pub discriminator: String,
    pub line: LineFields,
    pub switch: SwitchFields,
    pub bus: BusFields,
    pub load: PowerNodeFields,
    pub generator: PowerNodeFields,
}

impl Default for FieldTranslations {
    fn default() -> Self {
        Self {
            version: TRANSLATION_VERSION,
            discriminator: "id".to_string(),
            line: LineFields::default(),
            switch: SwitchFields::default(),
            bus: BusFields::default(),
            load: PowerNodeFields::default(),
            generator: PowerNodeFields::default(),
        }
    }
}

impl FieldTranslations {
    /// Every column the element parser reads.
    pub fn element_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.discriminator.as_str()];
        columns.extend(self.line.columns().into_iter().map(|(_, code)| code));
        columns.extend(self.switch.columns().into_iter().map(|(_, code)| code));
        dedup(columns)
    }

    /// Every column the node parser reads.
    pub fn node_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        columns.extend(self.bus.columns().into_iter().map(|(_, code)| code));
        columns.extend(self.load.columns().into_iter().map(|(_, code)| code));
        columns.extend(self.generator.columns().into_iter().map(|(_, code)| code));
        dedup(columns)
    }

    /// Element-file columns read as numbers. Every other column stays text.
    pub fn element_numeric_columns(&self) -> Vec<&str> {
        let line = &self.line;
        dedup(vec![
            self.discriminator.as_str(),
            line.length.as_str(),
            line.num_parallel.as_str(),
            line.rated_voltage.as_str(),
            line.rated_current.as_str(),
            line.reactance_per_length.as_str(),
            line.resistance_per_length.as_str(),
        ])
    }

    /// Node-file columns read as numbers.
    pub fn node_numeric_columns(&self) -> Vec<&str> {
        dedup(vec![
            self.load.magnitude1.as_str(),
            self.load.magnitude2.as_str(),
            self.generator.magnitude1.as_str(),
            self.generator.magnitude2.as_str(),
        ])
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.version != TRANSLATION_VERSION {
            return Err(ConvertError::InvalidConfig(format!(
                "translation table version {} is not supported (expected {})",
                self.version, TRANSLATION_VERSION
            )));
        }
        let named = std::iter::once(("discriminator", self.discriminator.as_str()))
            .chain(self.line.columns())
            .chain(self.switch.columns())
            .chain(self.bus.columns())
            .chain(self.load.columns())
            .chain(self.generator.columns());
        for (field, code) in named {
            if code.trim().is_empty() {
                return Err(ConvertError::InvalidConfig(format!(
                    "column code for '{field}' is empty"
                )));
            }
        }
        // Node rows are classified before their kind is known, so both
        // layouts must read power from the same columns.
        if self.load.magnitude1 != self.generator.magnitude1
            || self.load.magnitude2 != self.generator.magnitude2
        {
            return Err(ConvertError::InvalidConfig(format!(
                "load and generator magnitudes must share columns (load: {}/{}, generator: {}/{})",
                self.load.magnitude1,
                self.load.magnitude2,
                self.generator.magnitude1,
                self.generator.magnitude2
            )));
        }
        Ok(())
    }
}

fn dedup(columns: Vec<&str>) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(columns.len());
    for column in columns {
        if !out.contains(&column) {
            out.push(column);
        }
    }
    out
}

/// Line rows (discriminator `1`) of the element file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFields {
    pub name: String,
    pub bus0: String,
    pub bus1: String,
    pub length: String,
    pub num_parallel: String,
    pub type_info: String,
    pub rated_voltage: String,
    pub rated_current: String,
    pub reactance_per_length: String,
    pub resistance_per_length: String,
}

impl Default for LineFields {
    fn default() -> Self {
        Self {
            name: "c4".to_string(),
            bus0: "c1".to_string(),
            bus1: "c2".to_string(),
            length: "r20".to_string(),
            num_parallel: "r15".to_string(),
            type_info: "c6".to_string(),
            rated_voltage: "r1".to_string(),
            rated_current: "r7".to_string(),
            reactance_per_length: "r8".to_string(),
            resistance_per_length: "r11".to_string(),
        }
    }
}

impl LineFields {
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("line.name", self.name.as_str()),
            ("line.bus0", self.bus0.as_str()),
            ("line.bus1", self.bus1.as_str()),
            ("line.length", self.length.as_str()),
            ("line.num_parallel", self.num_parallel.as_str()),
            ("line.type_info", self.type_info.as_str()),
            ("line.rated_voltage", self.rated_voltage.as_str()),
            ("line.rated_current", self.rated_current.as_str()),
            ("line.reactance_per_length", self.reactance_per_length.as_str()),
            ("line.resistance_per_length", self.resistance_per_length.as_str()),
        ]
    }
}

/// Switch rows (discriminator `8` or `9`) of the element file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchFields {
    pub name: String,
    pub bus_open: String,
    pub bus_closed: String,
}

impl Default for SwitchFields {
    fn default() -> Self {
        Self {
            name: "c4".to_string(),
            bus_open: "c1".to_string(),
            bus_closed: "c2".to_string(),
        }
    }
}

impl SwitchFields {
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("switch.name", self.name.as_str()),
            ("switch.bus_open", self.bus_open.as_str()),
            ("switch.bus_closed", self.bus_closed.as_str()),
        ]
    }
}

/// Bus rows of the node file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusFields {
    pub name: String,
    pub control: String,
}

impl Default for BusFields {
    fn default() -> Self {
        Self {
            name: "c1".to_string(),
            control: "c2".to_string(),
        }
    }
}

impl BusFields {
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        vec![("bus.name", self.name.as_str()), ("bus.control", self.control.as_str())]
    }
}

/// Load and generator rows of the node file. Both share one layout: the
/// encoding column says how `magnitude1`/`magnitude2` combine into active
/// power (`S/P` and `Q/cos phi` in NEPLAN terms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerNodeFields {
    pub name: String,
    pub bus: String,
    pub encoding: String,
    pub magnitude1: String,
    pub magnitude2: String,
}

impl Default for PowerNodeFields {
    fn default() -> Self {
        Self {
            name: "c3".to_string(),
            bus: "c1".to_string(),
            encoding: "c2".to_string(),
            magnitude1: "r1".to_string(),
            magnitude2: "r2".to_string(),
        }
    }
}

impl PowerNodeFields {
    pub fn columns(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("power.name", self.name.as_str()),
            ("power.bus", self.bus.as_str()),
            ("power.encoding", self.encoding.as_str()),
            ("power.magnitude1", self.magnitude1.as_str()),
            ("power.magnitude2", self.magnitude2.as_str()),
        ]
    }
}

/// Remaps NEPLAN bus control codes to grid-model control modes. Codes
/// without an entry pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlModeMap(BTreeMap<String, String>);

impl Default for ControlModeMap {
    fn default() -> Self {
        let entries = [
            ("SL", "Slack"),
            ("PI", "PQ"),
            ("IC", "PQ"),
            ("PC", "PQ"),
            ("SC", "PQ"),
        ];
        Self(
            entries
                .into_iter()
                .map(|(code, mode)| (code.to_string(), mode.to_string()))
                .collect(),
        )
    }
}

impl ControlModeMap {
    pub fn remap(&self, code: &str) -> String {
        self.0
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_modes_remap_known_codes() {
        let map = ControlModeMap::default();
        assert_eq!(map.remap("SL"), "Slack");
        for code in ["PI", "IC", "PC", "SC"] {
            assert_eq!(map.remap(code), "PQ");
        }
    }

    #[test]
    fn control_modes_pass_unknown_codes_through() {
        let map = ControlModeMap::default();
        assert_eq!(map.remap("PV"), "PV");
        assert_eq!(map.remap(""), "");
    }

    #[test]
    fn element_columns_are_deduplicated() {
        let fields = FieldTranslations::default();
        let columns = fields.element_columns();
        assert_eq!(columns.iter().filter(|c| **c == "c1").count(), 1);
        assert!(columns.contains(&"id"));
        assert!(columns.contains(&"r7"));
    }

    #[test]
    fn node_columns_cover_shared_layout() {
        let fields = FieldTranslations::default();
        assert_eq!(fields.node_columns(), vec!["c1", "c2", "c3", "r1", "r2"]);
    }

    #[test]
    fn validate_rejects_unknown_version() {
        let fields = FieldTranslations {
            version: 7,
            ..FieldTranslations::default()
        };
        assert!(matches!(
            fields.validate(),
            Err(ConvertError::InvalidConfig(msg)) if msg.contains("version 7")
        ));
    }

    #[test]
    fn validate_rejects_empty_code() {
        let mut fields = FieldTranslations::default();
        fields.line.rated_current = " ".to_string();
        assert!(matches!(
            fields.validate(),
            Err(ConvertError::InvalidConfig(msg)) if msg.contains("line.rated_current")
        ));
    }

    #[test]
    fn numeric_columns_are_the_translated_measurements() {
        let fields = FieldTranslations::default();
        assert_eq!(
            fields.element_numeric_columns(),
            vec!["id", "r20", "r15", "r1", "r7", "r8", "r11"]
        );
        assert_eq!(fields.node_numeric_columns(), vec!["r1", "r2"]);
    }

    #[test]
    fn validate_rejects_split_magnitude_columns() {
        let mut fields = FieldTranslations::default();
        fields.generator.magnitude1 = "r5".to_string();
        assert!(matches!(
            fields.validate(),
            Err(ConvertError::InvalidConfig(msg)) if msg.contains("generator: r5/r2")
        ));
    }
}
