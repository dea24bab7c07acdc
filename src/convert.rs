//! Batch conversion engine
//!
//! Two-phase pipeline in the spirit of the original tool: extract every
//! input, then emit every output. Extraction of independent files runs as
//! semaphore-bounded tokio tasks and results are collected in input order,
//! so emission (and split-mode row order) stays deterministic. A malformed
//! document degrades to its own per-file outcome and never aborts the batch.

use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cli::ConvertConfig;
use crate::emit::{CsvEmitter, LOCKED_FILE_NAME, NO_SIGNAL_FILE_NAME};
use crate::error::{RangerError, Result};
use crate::extract::extract_document;
use crate::file_discovery::FileDiscovery;
use crate::table::{Table, TableResult, split_by_status};

/// Outcome of converting a single input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionStatus {
    /// File tabulated; in default mode its CSV was written, in split mode
    /// its rows were contributed to the combined table
    Converted { rows: usize },
    /// File skipped: the named measurement sequences came back empty
    MissingMeasurements { columns: Vec<String> },
    /// File could not be read or parsed
    Error { message: String },
}

impl ConversionStatus {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionStatus::Converted { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ConversionStatus::MissingMeasurements { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ConversionStatus::Error { .. })
    }
}

/// Result of converting a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConversionResult {
    /// Path to the input file
    pub path: PathBuf,
    /// Conversion status
    pub status: ConversionStatus,
}

impl FileConversionResult {
    pub fn converted(path: PathBuf, rows: usize) -> Self {
        Self {
            path,
            status: ConversionStatus::Converted { rows },
        }
    }

    pub fn missing(path: PathBuf, columns: Vec<String>) -> Self {
        Self {
            path,
            status: ConversionStatus::MissingMeasurements { columns },
        }
    }

    pub fn error(path: PathBuf, message: String) -> Self {
        Self {
            path,
            status: ConversionStatus::Error { message },
        }
    }
}

/// Aggregated results of converting a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionResults {
    /// Total number of files processed
    pub total_files: usize,
    /// Number of files converted
    pub converted_files: usize,
    /// Number of files skipped for missing measurements
    pub skipped_files: usize,
    /// Number of files with read/parse errors
    pub error_files: usize,
    /// Split mode only: rows dropped for an unrecognized status value
    pub dropped_rows: usize,
    /// Individual file results, in input order
    pub file_results: Vec<FileConversionResult>,
}

impl ConversionResults {
    /// Aggregate individual file results into summary counts
    pub fn aggregate(file_results: Vec<FileConversionResult>, dropped_rows: usize) -> Self {
        let total_files = file_results.len();
        let mut converted_files = 0;
        let mut skipped_files = 0;
        let mut error_files = 0;

        for result in &file_results {
            match result.status {
                ConversionStatus::Converted { .. } => converted_files += 1,
                ConversionStatus::MissingMeasurements { .. } => skipped_files += 1,
                ConversionStatus::Error { .. } => error_files += 1,
            }
        }

        Self {
            total_files,
            converted_files,
            skipped_files,
            error_files,
            dropped_rows,
            file_results,
        }
    }

    /// Check if any files failed to convert cleanly
    pub fn has_errors(&self) -> bool {
        self.error_files > 0 || self.skipped_files > 0
    }
}

/// Per-file extraction outcome, before emission
enum Extraction {
    Tabulated(TableResult),
    Failed(String),
}

/// Batch conversion engine: discover, extract concurrently, emit sequentially
pub struct ConversionEngine {
    config: ConvertConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Convert every `.XML` file directly under `path`
    ///
    /// Fatal only when the directory is missing or holds no matching files;
    /// per-file failures are carried in the returned results.
    pub async fn convert_path(&self, path: &Path) -> Result<ConversionResults> {
        let discovery = FileDiscovery::new().with_max_depth(Some(0));
        let files = discovery.discover_files(path).await?;

        if files.is_empty() {
            return Err(RangerError::NoInputFiles {
                path: path.to_path_buf(),
                extension: "XML".to_string(),
            });
        }

        let extracted = self.extract_files(files).await?;

        if self.config.rip_no_signal {
            self.emit_split(extracted)
        } else {
            self.emit_per_file(extracted)
        }
    }

    /// Extract a list of files as concurrent tasks, preserving input order
    async fn extract_files(
        &self,
        files: Vec<PathBuf>,
    ) -> Result<Vec<(PathBuf, Extraction)>> {
        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.config.max_concurrent));

        let extraction_tasks: Vec<_> = files
            .into_iter()
            .map(|path| {
                let semaphore = Arc::clone(&semaphore);

                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await.map_err(|_| {
                        RangerError::Concurrency {
                            details: "Failed to acquire extraction semaphore".to_string(),
                        }
                    })?;

                    let extraction = Self::extract_single_file(&path).await;
                    Ok::<(PathBuf, Extraction), RangerError>((path, extraction))
                })
            })
            .collect();

        let task_results =
            try_join_all(extraction_tasks)
                .await
                .map_err(|e| RangerError::Concurrency {
                    details: format!("Task join error: {}", e),
                })?;

        let mut extractions = Vec::with_capacity(task_results.len());
        for result in task_results {
            extractions.push(result?);
        }

        Ok(extractions)
    }

    /// Read, parse and tabulate one file; failures degrade to an outcome
    async fn extract_single_file(path: &Path) -> Extraction {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) => return Extraction::Failed(e.to_string()),
        };

        match roxmltree::Document::parse(&text) {
            Ok(doc) => Extraction::Tabulated(Table::build(extract_document(&doc))),
            Err(e) => Extraction::Failed(e.to_string()),
        }
    }

    /// Default mode: one CSV per tabulated input, beside the input
    fn emit_per_file(
        &self,
        extracted: Vec<(PathBuf, Extraction)>,
    ) -> Result<ConversionResults> {
        let mut file_results = Vec::with_capacity(extracted.len());

        for (path, extraction) in extracted {
            let result = match extraction {
                Extraction::Failed(message) => FileConversionResult::error(path, message),
                Extraction::Tabulated(TableResult::MissingColumns(columns)) => {
                    FileConversionResult::missing(path, columns)
                }
                Extraction::Tabulated(TableResult::Table(table)) => {
                    CsvEmitter::write_table(&table, &CsvEmitter::output_path(&path))?;
                    FileConversionResult::converted(path, table.rows())
                }
            };
            file_results.push(result);
        }

        Ok(ConversionResults::aggregate(file_results, 0))
    }

    /// Split mode: concatenate tabulated inputs and partition by status
    fn emit_split(
        &self,
        extracted: Vec<(PathBuf, Extraction)>,
    ) -> Result<ConversionResults> {
        let output_dir = extracted
            .first()
            .and_then(|(path, _)| path.parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut file_results = Vec::with_capacity(extracted.len());
        let mut tables = Vec::new();

        for (path, extraction) in extracted {
            let result = match extraction {
                Extraction::Failed(message) => FileConversionResult::error(path, message),
                Extraction::Tabulated(TableResult::MissingColumns(columns)) => {
                    FileConversionResult::missing(path, columns)
                }
                Extraction::Tabulated(TableResult::Table(table)) => {
                    let result = FileConversionResult::converted(path, table.rows());
                    tables.push(table);
                    result
                }
            };
            file_results.push(result);
        }

        let combined = Table::concat(tables);
        let split = split_by_status(&combined)?;

        CsvEmitter::write_table(&split.locked, &output_dir.join(LOCKED_FILE_NAME))?;
        CsvEmitter::write_table(&split.no_signal, &output_dir.join(NO_SIGNAL_FILE_NAME))?;

        Ok(ConversionResults::aggregate(file_results, split.dropped))
    }
}
