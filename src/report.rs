//! Text report for the `map-files` inventory

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::inventory::{ExtensionSummary, FileEntry};

const SUMMARY_BANNER: &str = "*********** SUMMARY ***********";
const COLUMN_WIDTH: usize = 17;

/// Format a byte count as `B`/`KB`/`MB`/`GB`, right-justified to 9 columns
///
/// Decimal thousands, rounded to at most two decimals; KB and larger always
/// keep at least one decimal (`2.0 KB`, not `2 KB`).
pub fn format_size(bytes: u64) -> String {
    let formatted = if bytes < 1_000 {
        format!("{} B", bytes)
    } else if bytes < 1_000_000 {
        format!("{} KB", scaled(bytes, 1_000.0))
    } else if bytes < 1_000_000_000 {
        format!("{} MB", scaled(bytes, 1_000_000.0))
    } else {
        format!("{} GB", scaled(bytes, 1_000_000_000.0))
    };

    format!("{:>9}", formatted)
}

fn scaled(bytes: u64, divisor: f64) -> String {
    let value = (bytes as f64 / divisor * 100.0).round() / 100.0;
    if (value * 10.0).fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Writes the inventory report
pub struct ReportWriter {
    output: PathBuf,
}

impl ReportWriter {
    pub fn new(output: PathBuf) -> Self {
        Self { output }
    }

    /// Render and write the report, creating the output directory if needed
    pub fn write(
        &self,
        folder: &Path,
        entries: &[FileEntry],
        summaries: &[ExtensionSummary],
    ) -> Result<()> {
        if let Some(parent) = self.output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.output, self.render(folder, entries, summaries))?;
        Ok(())
    }

    /// Render the report: header, per-file lines, banner, extension table
    pub fn render(
        &self,
        folder: &Path,
        entries: &[FileEntry],
        summaries: &[ExtensionSummary],
    ) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "LIST OF ALL FILES INSIDE FOLDERS AND ITS SUBFOLDERS IN \"{}\".\n\n",
            folder.display()
        ));

        for entry in entries {
            report.push_str(&format!(
                "{} - {}\n",
                format_size(entry.size),
                entry.path.display()
            ));
        }

        report.push_str(&format!("\n\n{:^53}\n\n", SUMMARY_BANNER));

        report.push_str(&format!(
            "{:^width$}|{:^width$}|{:^width$}\n",
            "TOTAL SIZE",
            "NUMBER OF FILES",
            "FILE",
            width = COLUMN_WIDTH
        ));

        for summary in summaries {
            report.push_str(&format!(
                "{:^width$}|{:^width$}|{:^width$}\n",
                format_size(summary.total_size),
                summary.count,
                summary.extension,
                width = COLUMN_WIDTH
            ));
        }

        report
    }
}
