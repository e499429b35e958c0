use serde::Serialize;

/// Severity level for conversion issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,    // Expected skip (e.g., line segment row)
    Warning, // Converted, but worth a look (e.g., duplicate bus name)
}

/// A single issue encountered during conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionIssue {
    pub severity: Severity,
    pub category: String, // "segment", "discriminator", "bus", "classification"
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>, // "bus 'K1'", "load 'L3'"
}

/// Row counts gathered while parsing
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    pub element_rows: usize,
    pub node_rows: usize,
    pub lines: usize,
    pub switches: usize,
    pub buses: usize,
    pub loads: usize,
    pub generators: usize,
    pub segment_rows: usize,
    pub ignored_rows: usize,
}

/// Diagnostics for one conversion run. Fatal problems are errors returned
/// from the pipeline, never entries here.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionDiagnostics {
    pub stats: ConversionStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ConversionIssue>,
}

impl ConversionDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_info(&mut self, category: &str, message: &str) {
        self.push(Severity::Info, category, message, None, None);
    }

    /// Add a line-segment skip (for detailed mode)
    pub fn add_segment_at_line(&mut self, message: &str, line: usize) {
        self.push(Severity::Info, "segment", message, Some(line), None);
        self.stats.segment_rows += 1;
    }

    /// Add a warning with line number and entity reference
    pub fn add_warning_at_line(&mut self, category: &str, message: &str, line: usize, entity: &str) {
        tracing::warn!(category, line, entity, "{}", message);
        self.push(
            Severity::Warning,
            category,
            message,
            Some(line),
            Some(entity.to_string()),
        );
    }

    fn push(
        &mut self,
        severity: Severity,
        category: &str,
        message: &str,
        line: Option<usize>,
        entity: Option<String>,
    ) {
        self.issues.push(ConversionIssue {
            severity,
            category: category.to_string(),
            message: message.to_string(),
            line,
            entity,
        });
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_counts() {
        let mut diag = ConversionDiagnostics::new();
        diag.add_info("discriminator", "ignored 3 rows with id 2");
        diag.add_segment_at_line("line segment without bus1", 4);
        diag.add_warning_at_line("bus", "duplicate bus name", 9, "bus 'K1'");

        assert_eq!(diag.issues.len(), 3);
        assert_eq!(diag.warning_count(), 1);
        assert_eq!(diag.stats.segment_rows, 1);
        assert!(diag.has_warnings());
    }

    #[test]
    fn test_diagnostics_serialization() {
        let mut diag = ConversionDiagnostics::new();
        diag.stats.buses = 14;
        diag.add_warning_at_line("bus", "duplicate bus name", 47, "bus 'K7'");

        let json = serde_json::to_string_pretty(&diag).unwrap();
        assert!(json.contains("\"buses\": 14"));
        assert!(json.contains("\"warning\""));
        assert!(json.contains("\"line\": 47"));
    }
}
