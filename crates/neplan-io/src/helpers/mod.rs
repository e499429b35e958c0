pub mod conversions;
pub mod diagnostics;

pub use conversions::{decode_latin1, parse_decimal_comma, safe_f64_to_i32};
pub use diagnostics::{ConversionDiagnostics, ConversionIssue, ConversionStats, Severity};
