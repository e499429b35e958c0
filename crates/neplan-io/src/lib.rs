//! # neplan-io: NEPLAN Element/Node File Conversion
//!
//! Reads the two tab-separated exports of the NEPLAN planning tool and turns
//! them into grid-model tables (lines, switches, buses, loads, generators).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neplan_io::convert;
//!
//! fn main() -> anyhow::Result<()> {
//!     let tables = convert("grid.edt.txt", "grid.ndt.txt")?;
//!     println!("Lines: {}", tables.lines.len());
//!     println!("Buses: {}", tables.buses.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. **Raw read** ([`raw`]) - ISO-8859-1, tab separated, decimal comma
//! 2. **Element parsing** ([`element`]) - lines (kind `1`, entire lines only)
//!    and switches (kinds `8`/`9`)
//! 3. **Node parsing** ([`node`]) - bus/load/generator split by power sign
//! 4. **Power conversion** ([`power`]) - `PQ`/`PC`/`SC` encodings to signed
//!    active power
//! 5. **Referential validation** ([`validate`]) - every load and generator
//!    must sit on a known bus
//! 6. **Export** ([`export`]) - one CSV per table
//!
//! Steps 2 and 3 are independent. Any error aborts the run before output is
//! produced.
//!
//! ## Error Handling
//!
//! Entry points return `anyhow::Result`. Conversion failures carry a
//! [`neplan_core::ConvertError`]:
//!
//! ```rust,no_run
//! use neplan_core::ConvertError;
//! use neplan_io::convert;
//!
//! match convert("grid.edt.txt", "grid.ndt.txt") {
//!     Ok(tables) => println!("{} loads", tables.loads.len()),
//!     Err(err) => match err.downcast_ref::<ConvertError>() {
//!         Some(ConvertError::UnresolvedBus { partition, missing, .. }) => {
//!             eprintln!("{missing} {partition} without bus")
//!         }
//!         _ => eprintln!("conversion failed: {err:#}"),
//!     },
//! }
//! ```

pub mod element;
pub mod export;
pub mod helpers;
pub mod node;
pub mod pipeline;
pub mod power;
pub mod raw;
pub mod summary;
pub mod validate;

pub use element::{parse_element_table, read_element_file, ElementKind, ElementTables};
pub use export::{write_csv, write_tables_csv};
pub use helpers::{ConversionDiagnostics, ConversionIssue, ConversionStats, Severity};
pub use node::{classify_node, parse_node_table, read_node_file, NodeClass, NodeTables};
pub use pipeline::{convert, ConversionResult, Converter};
pub use power::{convert_power, PowerEncoding, PowerRole};
pub use raw::{Cell, RawRow, RawTable};
pub use summary::{summarize, ConversionSummary};
pub use validate::{validate_bus_references, BusReference};
