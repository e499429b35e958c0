//! # neplan-core: Grid-Model Tables for NEPLAN Exports
//!
//! Data types shared by the NEPLAN converter: the five output record kinds,
//! the field translation tables that map NEPLAN's positional column codes
//! (`c1`, `r7`, ...) to meaningful fields, the converter configuration and
//! the error kinds a conversion can fail with.
//!
//! ## Output Tables
//!
//! | Table | Record | Key | Source |
//! |-------|--------|-----|--------|
//! | `lines` | [`LineRecord`] | - | element file, discriminator `1` |
//! | `switches` | [`SwitchRecord`] | - | element file, discriminator `8`/`9` |
//! | `buses` | [`BusRecord`] | `name` | node file, no power |
//! | `loads` | [`LoadRecord`] | `name` | node file, positive power |
//! | `generators` | [`GeneratorRecord`] | `name` | node file, negative power |
//!
//! ## Configuration
//!
//! [`ConverterConfig`] carries every column code and fixed label the parsers
//! need. It is built once (defaults or a TOML file) and passed by reference
//! into the parsers, so the positional coupling lives in
//! [`translation`] only.
//!
//! ```
//! use neplan_core::ConverterConfig;
//!
//! let config = ConverterConfig::default();
//! assert_eq!(config.translations.line.rated_current, "r7");
//! assert_eq!(config.control_modes.remap("SL"), "Slack");
//! ```

pub mod config;
pub mod error;
pub mod records;
pub mod translation;

pub use config::ConverterConfig;
pub use error::{ConvertError, Partition};
pub use records::{
    BusRecord, GeneratorRecord, GridTables, LineRecord, LoadRecord, SwitchRecord, TableKind,
    TableRecord, TableSet,
};
pub use translation::{
    BusFields, ControlModeMap, FieldTranslations, LineFields, PowerNodeFields, SwitchFields,
    TRANSLATION_VERSION,
};
