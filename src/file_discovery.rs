use crate::error::{RangerError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Async file discovery for measurement input directories
///
/// Extensions are compared case-sensitively: the Ranger Explorer writes
/// `.XML` in upper case and lower-case lookalikes are not measurement files.
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    /// File extensions to include (e.g., ["XML"])
    extensions: Vec<String>,
    /// Maximum depth for directory traversal (None = unlimited)
    max_depth: Option<usize>,
    /// Follow symbolic links
    follow_symlinks: bool,
}

impl FileDiscovery {
    /// Create a new FileDiscovery instance
    pub fn new() -> Self {
        Self {
            extensions: vec!["XML".to_string()],
            max_depth: None,
            follow_symlinks: false,
        }
    }

    /// Set file extensions to discover
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set maximum traversal depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Discover matching files under `path`, sorted for deterministic batch order
    pub async fn discover_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(_) => {
                return Err(RangerError::MissingDirectory {
                    path: path.to_path_buf(),
                });
            }
        };

        if metadata.is_file() {
            if self.should_process(path) {
                return Ok(vec![path.to_path_buf()]);
            } else {
                return Ok(Vec::new());
            }
        }

        let mut files = Vec::new();

        let mut read_dir = fs::read_dir(path).await.map_err(RangerError::from)?;

        while let Some(entry) = read_dir.next_entry().await.map_err(RangerError::from)? {
            let entry_path = entry.path();

            if entry_path.is_symlink() && !self.follow_symlinks {
                continue;
            }

            // Process each entry at depth 0
            if let Err(e) = self
                .discover_files_recursive(&entry_path, 0, &mut files)
                .await
            {
                // Log error but continue processing other files
                eprintln!("Warning: Error processing {}: {}", entry_path.display(), e);
            }
        }

        files.sort();

        Ok(files)
    }

    /// Recursive helper for discovering files
    fn discover_files_recursive<'a>(
        &'a self,
        path: &'a Path,
        depth: usize,
        files: &'a mut Vec<PathBuf>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<()>> + 'a>> {
        Box::pin(async move {
            if let Some(max_depth) = self.max_depth
                && depth > max_depth
            {
                return Ok(());
            }

            let metadata = fs::metadata(path).await.map_err(RangerError::from)?;

            if metadata.is_file() {
                if self.should_process(path) {
                    files.push(path.to_path_buf());
                }
            } else if metadata.is_dir() {
                // Only recurse into directories if we can still go deeper
                if let Some(max_depth) = self.max_depth
                    && depth >= max_depth
                {
                    return Ok(());
                }

                let mut read_dir = fs::read_dir(path).await.map_err(RangerError::from)?;

                while let Some(entry) =
                    read_dir.next_entry().await.map_err(RangerError::from)?
                {
                    let entry_path = entry.path();

                    if entry_path.is_symlink() && !self.follow_symlinks {
                        continue;
                    }

                    if let Err(e) = self
                        .discover_files_recursive(&entry_path, depth + 1, files)
                        .await
                    {
                        eprintln!("Warning: Error processing {}: {}", entry_path.display(), e);
                    }
                }
            }

            Ok(())
        })
    }

    /// Check if a file should be processed based on its extension
    pub fn should_process(&self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(extension) => self.extensions.iter().any(|e| e == extension),
            None => false,
        }
    }
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}
