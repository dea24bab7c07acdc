//! Directory inventory for the `map-files` report
//!
//! Walks a folder tree, records every regular file with its byte size, and
//! folds the list into per-extension aggregates. Aggregation is a pure fold
//! over the scanned entries; nothing is accumulated while writing output.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{RangerError, Result};

/// One regular file found under the scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Per-extension aggregate over the scanned files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSummary {
    /// Extension with its leading dot; empty for files without one
    pub extension: String,
    pub count: u64,
    pub total_size: u64,
}

/// Scan every regular file under `root`, largest first
///
/// `extension` filters case-sensitively, compared without the leading dot.
/// Unreadable entries are skipped rather than aborting the walk.
pub fn scan(root: &Path, extension: Option<&str>) -> Result<Vec<FileEntry>> {
    if !root.is_dir() {
        return Err(RangerError::MissingDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut entries: Vec<FileEntry> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| match extension {
            Some(ext) => matches_extension(e.path(), ext),
            None => true,
        })
        .filter_map(|e| {
            let size = e.metadata().ok()?.len();
            Some(FileEntry {
                path: e.into_path(),
                size,
            })
        })
        .collect();

    entries.sort_by(|a, b| b.size.cmp(&a.size));

    Ok(entries)
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

/// Extension key used for aggregation: `.txt`, or empty for no extension
fn extension_key(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default()
}

/// Fold the file list into per-extension (count, total size) aggregates,
/// sorted by (count, size) descending
pub fn summarize_extensions(entries: &[FileEntry]) -> Vec<ExtensionSummary> {
    let totals = entries
        .iter()
        .fold(HashMap::<String, (u64, u64)>::new(), |mut acc, entry| {
            let aggregate = acc.entry(extension_key(&entry.path)).or_insert((0, 0));
            aggregate.0 += 1;
            aggregate.1 += entry.size;
            acc
        });

    let mut summaries: Vec<ExtensionSummary> = totals
        .into_iter()
        .map(|(extension, (count, total_size))| ExtensionSummary {
            extension,
            count,
            total_size,
        })
        .collect();

    summaries.sort_by(|a, b| (b.count, b.total_size).cmp(&(a.count, a.total_size)));

    summaries
}
