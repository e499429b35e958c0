//! Converter configuration.
//!
//! All fields default, so a TOML file only has to name what differs from the
//! standard layout:
//!
//! ```toml
//! nominal_voltage_kv = 20.0
//!
//! [translations.line]
//! rated_current = "r9"
//!
//! [control_modes]
//! SL = "Slack"
//! PV = "PV"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::translation::{ControlModeMap, FieldTranslations};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub translations: FieldTranslations,
    pub control_modes: ControlModeMap,
    /// `v_nom` written for every bus; the exporter only covers medium voltage.
    pub nominal_voltage_kv: f64,
    /// `type_info` written for every switch
    pub switch_type_info: String,
    /// `control` written for every generator
    pub generator_control: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            translations: FieldTranslations::default(),
            control_modes: ControlModeMap::default(),
            nominal_voltage_kv: 10.0,
            switch_type_info: "Switch Disconnector".to_string(),
            generator_control: "PQ".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load and validate a configuration file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading converter config '{}'", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("loading converter config '{}'", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("parsing converter config as TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        self.translations.validate()?;
        if !self.nominal_voltage_kv.is_finite() || self.nominal_voltage_kv <= 0.0 {
            return Err(ConvertError::InvalidConfig(format!(
                "nominal_voltage_kv must be positive, got {}",
                self.nominal_voltage_kv
            )));
        }
        Ok(())
    }
}
