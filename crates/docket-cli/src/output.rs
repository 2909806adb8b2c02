//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docket_refiner::RunReport;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the report of a finished run.
    pub fn format_report(&self, report: &RunReport, output: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report, output),
            OutputFormat::Table => Ok(self.format_report_table(report, output)),
            OutputFormat::Quiet => Ok(output.display().to_string()),
        }
    }

    fn format_report_json(&self, report: &RunReport, output: &Path) -> Result<String> {
        let mut value = serde_json::to_value(report)?;
        if let Some(object) = value.as_object_mut() {
            object.insert(
                "output".to_string(),
                serde_json::Value::String(output.display().to_string()),
            );
        }
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_report_table(&self, report: &RunReport, output: &Path) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);

        let rows = [
            ("Run", report.run_id.to_string()),
            ("State", report.state.to_string()),
            ("Files found", report.files_found.to_string()),
            ("Files skipped", report.files_skipped.to_string()),
            ("Records written", report.records_written.to_string()),
            ("Parsed", report.parsed.to_string()),
            ("Parse failures", report.parse_failures.to_string()),
            ("Item failures", report.item_failures.to_string()),
            ("Elapsed", format!("{} ms", report.processing_time_ms)),
            ("Output", output.display().to_string()),
        ];
        for (metric, value) in rows {
            builder.push_record([metric.to_string(), value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let status = if report.is_clean() {
            self.success(&format!("Refined {} record(s)", report.records_written))
        } else {
            self.warning(&format!(
                "Refined {} record(s); {} skipped, {} failed",
                report.records_written,
                report.files_skipped,
                report.parse_failures + report.item_failures
            ))
        };

        format!("{}\n{}", table, status)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
