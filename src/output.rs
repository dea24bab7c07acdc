//! Simple Output and Reporting
//!
//! This module provides console formatting for batch conversion results.

use atty;

use crate::cli::VerbosityLevel;
use crate::convert::{ConversionResults, ConversionStatus, FileConversionResult};

/// Simple output formatter for human-readable results
pub struct Output {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_results(&self, results: &ConversionResults) -> String {
        let mut output = String::new();

        match self.verbosity {
            VerbosityLevel::Quiet => {
                if results.has_errors() {
                    output.push_str(&format!(
                        "Errors: {} Skipped: {}\n",
                        results.error_files, results.skipped_files
                    ));
                }
            }
            VerbosityLevel::Normal | VerbosityLevel::Verbose => {
                // Skipped and errored files are always reported: the operator
                // needs to know which inputs produced no CSV and why
                for file_result in &results.file_results {
                    if self.verbosity >= VerbosityLevel::Verbose
                        || !file_result.status.is_converted()
                    {
                        output.push_str(&self.format_file_result(file_result));
                        output.push('\n');
                    }
                }

                output.push_str(&self.format_summary(results));
            }
        }

        output
    }

    pub fn format_file_result(&self, result: &FileConversionResult) -> String {
        let path_display = result.path.display();

        match &result.status {
            ConversionStatus::Converted { rows } => {
                format!(
                    "{}  {} ({} row{})",
                    self.colorize("✓ CONVERTED", "32"),
                    path_display,
                    rows,
                    if *rows == 1 { "" } else { "s" }
                )
            }
            ConversionStatus::MissingMeasurements { columns } => {
                format!(
                    "{}  {} - missing measurements: {}",
                    self.colorize("- SKIPPED", "36"),
                    path_display,
                    if columns.is_empty() {
                        "inconsistent column lengths".to_string()
                    } else {
                        columns.join(", ")
                    }
                )
            }
            ConversionStatus::Error { message } => {
                format!(
                    "{}  {} - {}",
                    self.colorize("⚠ ERROR", "33"),
                    path_display,
                    message
                )
            }
        }
    }

    fn format_summary(&self, results: &ConversionResults) -> String {
        let mut output = String::new();
        output.push_str("Conversion Summary:\n");
        output.push_str(&format!("  Total files: {}\n", results.total_files));
        output.push_str(&format!(
            "  {} {}\n",
            self.colorize("Converted:", "32"),
            results.converted_files
        ));

        if results.skipped_files > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Skipped:", "36"),
                results.skipped_files
            ));
        }
        if results.error_files > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("Errors:", "33"),
                results.error_files
            ));
        }
        if results.dropped_rows > 0 {
            output.push_str(&format!(
                "  {} dropped {} row{} with unrecognized status\n",
                self.colorize("Warning:", "33"),
                results.dropped_rows,
                if results.dropped_rows == 1 { "" } else { "s" }
            ));
        }

        output
    }
}
