//! # ranger-tools Library
//!
//! Library behind two small field-engineering command-line tools:
//! `map-files`, which inventories the files under a directory and writes a
//! sorted size report with a per-extension summary, and `xml2csv`, which
//! converts batches of PROMAX Ranger Explorer XML measurement files to CSV,
//! optionally splitting rows by signal status.

pub mod cli;
pub mod convert;
pub mod emit;
pub mod error;
pub mod extract;
pub mod file_discovery;
pub mod inventory;
pub mod output;
pub mod report;
pub mod table;

pub use cli::{ConvertCli, ConvertConfig, InventoryCli, VerbosityLevel};
pub use convert::{
    ConversionEngine, ConversionResults, ConversionStatus, FileConversionResult,
};
pub use emit::CsvEmitter;
pub use error::{RangerError, Result};
pub use extract::{Measure, extract_document};
pub use file_discovery::FileDiscovery;
pub use inventory::{ExtensionSummary, FileEntry, scan, summarize_extensions};
pub use output::Output;
pub use report::{ReportWriter, format_size};
pub use table::{Column, ColumnSet, StatusSplit, Table, TableResult, split_by_status};
