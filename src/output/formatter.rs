//! Output formatters for probe results
//!
//! Provides table, JSON, and brief summary output.

use crate::models::{TestResult, TestRunSummary, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
#[derive(Clone, Copy, Debug)]
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format the immediate pass/fail line for one step
    pub fn format_result(&self, result: &TestResult) -> String {
        let status_str = if self.colorize {
            match result.status {
                TestStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                TestStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                TestStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match result.status {
                TestStatus::Pass => "✓ PASS",
                TestStatus::Fail => "✗ FAIL",
                TestStatus::Error => "! ERROR",
            }
        };

        format!(
            "{}: {} - {} [{}ms]",
            status_str,
            result.test_case.name(),
            result.message.as_deref().unwrap_or(""),
            result.duration_ms
        )
    }

    /// Format the end-of-run summary
    pub fn format_summary(&self, summary: &TestRunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &TestRunSummary) -> String {
        let mut out = String::new();

        out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        out.push_str("TEST SUMMARY\n");
        out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        out.push_str(&format!(
            "Passed: {}/{}\nFailed: {}/{}\n",
            summary.passed,
            summary.total,
            summary.total - summary.passed,
            summary.total
        ));
        out.push_str(&format!(
            "Pass Rate: {:.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));

        let failures = summary.failures();
        if !failures.is_empty() {
            out.push_str("\nFAILED TESTS:\n");
            for result in failures {
                out.push_str(&format!(
                    "  • {}: {}\n",
                    result.test_case.name(),
                    result.message.as_deref().unwrap_or("")
                ));
            }
        }

        out
    }

    fn format_summary_brief(&self, summary: &TestRunSummary) -> String {
        format!(
            "{}/{} passed ({:.1}%)",
            summary.passed,
            summary.total,
            summary.pass_rate()
        )
    }
}
