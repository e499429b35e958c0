//! Error kinds for NEPLAN conversion
//!
//! Every variant is fatal: a conversion either produces all requested tables
//! or none. Library entry points return `anyhow::Result`, so callers recover
//! the typed error with `err.downcast_ref::<ConvertError>()`.

use std::fmt;

use thiserror::Error;

/// Node-file partition that references buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Loads,
    Generators,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Loads => write!(f, "loads"),
            Partition::Generators => write!(f, "generators"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// A load or generator row uses a power encoding outside `PQ`, `PC`, `SC`.
    #[error("power encoding {code:?} of {element} is unknown (expected PQ, PC or SC)")]
    UnknownPowerEncoding { code: String, element: String },

    /// Rows of a partition point at bus names missing from the bus table.
    #[error("{missing} of {total} {partition} are missing a bus to join on")]
    UnresolvedBus {
        partition: Partition,
        missing: usize,
        total: usize,
    },

    /// Rows of a partition join more than one bus because a referenced bus
    /// name appears several times in the bus table.
    #[error("{partition} join {extra} extra bus row(s) beyond {total}; referenced bus names are duplicated")]
    AmbiguousBus {
        partition: Partition,
        extra: usize,
        total: usize,
    },

    /// A numeric cell could not be parsed.
    #[error("column '{column}' on line {line}: cannot parse {value:?} as a number")]
    MalformedNumber {
        column: String,
        line: usize,
        value: String,
    },

    /// A column named by the translation tables is absent from the header.
    #[error("column '{column}' is missing from the file header")]
    MissingColumn { column: String },

    #[error("invalid converter configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_bus_message_names_partition_and_delta() {
        let err = ConvertError::UnresolvedBus {
            partition: Partition::Generators,
            missing: 2,
            total: 7,
        };
        assert_eq!(
            err.to_string(),
            "2 of 7 generators are missing a bus to join on"
        );
    }

    #[test]
    fn ambiguous_bus_message_names_extra_rows() {
        let err = ConvertError::AmbiguousBus {
            partition: Partition::Loads,
            extra: 1,
            total: 3,
        };
        assert_eq!(
            err.to_string(),
            "loads join 1 extra bus row(s) beyond 3; referenced bus names are duplicated"
        );
    }

    #[test]
    fn unknown_encoding_message_includes_code() {
        let err = ConvertError::UnknownPowerEncoding {
            code: "XX".to_string(),
            element: "load 'L1'".to_string(),
        };
        assert!(err.to_string().contains("\"XX\""));
        assert!(err.to_string().contains("load 'L1'"));
    }
}
