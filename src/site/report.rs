//! Report of a site generation run

use serde::{Deserialize, Serialize};

use crate::converter::DocumentStatistics;

/// What happened to one entry of the source tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryAction {
    CreatedDirectory,
    Converted,
    Copied,
}

impl std::fmt::Display for EntryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryAction::CreatedDirectory => write!(f, "mkdir"),
            EntryAction::Converted => write!(f, "convert"),
            EntryAction::Copied => write!(f, "copy"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub input: String,
    pub output: String,
    pub action: EntryAction,
}

/// An entry that could not be processed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedEntry {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for FailedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteReport {
    pub input_directory: String,
    pub output_directory: String,
    /// Start of the run
    pub timestamp: String,
    pub duration_ms: u64,
    pub directories_created: usize,
    pub documents_converted: usize,
    pub files_copied: usize,
    /// Totals over every converted document
    pub documents: DocumentStatistics,
    pub entries: Vec<ReportEntry>,
    pub failures: Vec<FailedEntry>,
}

impl SiteReport {
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            input_directory: input.to_string(),
            output_directory: output.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            duration_ms: 0,
            directories_created: 0,
            documents_converted: 0,
            files_copied: 0,
            documents: DocumentStatistics::default(),
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, input: &str, output: &str, action: EntryAction) {
        match action {
            EntryAction::CreatedDirectory => self.directories_created += 1,
            EntryAction::Converted => self.documents_converted += 1,
            EntryAction::Copied => self.files_copied += 1,
        }
        self.entries.push(ReportEntry {
            input: input.to_string(),
            output: output.to_string(),
            action,
        });
    }

    pub fn add_failure(&mut self, path: &str, message: String) {
        self.failures.push(FailedEntry {
            path: path.to_string(),
            message,
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to human-readable text format
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str("Site Generation Report\n");
        output.push_str("======================\n");
        output.push_str(&format!("Input:  {}\n", self.input_directory));
        output.push_str(&format!("Output: {}\n", self.output_directory));
        output.push_str(&format!("Date:   {}\n", self.timestamp));
        output.push_str(&format!("Time:   {}ms\n\n", self.duration_ms));

        output.push_str("Summary\n");
        output.push_str("-------\n");
        output.push_str(&format!("Directories:     {}\n", self.directories_created));
        output.push_str(&format!("Converted:       {}\n", self.documents_converted));
        output.push_str(&format!("Copied:          {}\n", self.files_copied));
        output.push_str(&format!("Failed:          {}\n", self.failures.len()));
        output.push_str(&format!("Lines converted: {}\n\n", self.documents.total_lines));

        if !self.documents.elements.is_empty() {
            output.push_str("Elements\n");
            output.push_str("--------\n");
            for (name, count) in &self.documents.elements {
                output.push_str(&format!("{}: {}\n", name, count));
            }
            output.push('\n');
        }

        if !self.entries.is_empty() {
            output.push_str("Entries\n");
            output.push_str("-------\n");
            for entry in &self.entries {
                output.push_str(&format!(
                    "{:<7} {} -> {}\n",
                    entry.action.to_string(),
                    entry.input,
                    entry.output
                ));
            }
            output.push('\n');
        }

        if !self.failures.is_empty() {
            output.push_str("Failures\n");
            output.push_str("--------\n");
            for failure in &self.failures {
                output.push_str(&format!("✗ {}\n", failure));
            }
            output.push('\n');
        }

        output.push_str("Result\n");
        output.push_str("------\n");
        if self.has_failures() {
            output.push_str("✗ Site generated with failures\n");
        } else {
            output.push_str("✓ Site generated successfully\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_actions() {
        let mut report = SiteReport::new("in", "out");
        report.record("in/a", "out/a", EntryAction::CreatedDirectory);
        report.record("in/a/x.gmi", "out/a/x.html", EntryAction::Converted);
        report.record("in/a/y.png", "out/a/y.png", EntryAction::Copied);
        report.record("in/a/z.png", "out/a/z.png", EntryAction::Copied);

        assert_eq!(report.directories_created, 1);
        assert_eq!(report.documents_converted, 1);
        assert_eq!(report.files_copied, 2);
        assert_eq!(report.entries.len(), 4);
        assert!(!report.has_failures());
    }

    #[test]
    fn test_failure_display() {
        let mut report = SiteReport::new("in", "out");
        report.add_failure("in/broken.gmi", "permission denied".to_string());
        assert!(report.has_failures());
        assert_eq!(report.failures[0].to_string(), "in/broken.gmi: permission denied");
    }

    #[test]
    fn test_report_to_json() {
        let mut report = SiteReport::new("in", "out");
        report.record("in/x.gmi", "out/x.html", EntryAction::Converted);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"input_directory\": \"in\""));
        assert!(json.contains("\"action\": \"converted\""));
    }

    #[test]
    fn test_report_to_text() {
        let mut report = SiteReport::new("in", "out");
        report.record("in/x.gmi", "out/x.html", EntryAction::Converted);
        report.add_failure("in/y.png", "disk full".to_string());

        let text = report.to_text();
        assert!(text.contains("Site Generation Report"));
        assert!(text.contains("Input:  in"));
        assert!(text.contains("Converted:       1"));
        assert!(text.contains("convert in/x.gmi -> out/x.html"));
        assert!(text.contains("✗ in/y.png: disk full"));
        assert!(text.contains("✗ Site generated with failures"));
    }
}
