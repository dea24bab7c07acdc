use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show critical errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
}

/// Converter run configuration derived from CLI
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertConfig {
    pub path: PathBuf,
    pub rip_no_signal: bool,
    pub max_concurrent: usize,
    pub verbose: bool,
    pub quiet: bool,
}

impl ConvertConfig {
    pub fn from_cli(cli: &ConvertCli) -> Self {
        Self {
            path: cli.path.clone(),
            rip_no_signal: cli.rip_no_signal,
            max_concurrent: cli.get_max_concurrent(),
            verbose: cli.verbose,
            quiet: cli.quiet,
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Batch converter for PROMAX Ranger Explorer measurement files
#[derive(Parser, Debug, Clone)]
#[command(name = "xml2csv")]
#[command(about = "Convert a folder of PROMAX Ranger Explorer XML measurement files to CSV")]
#[command(version)]
pub struct ConvertCli {
    /// Directory containing the .XML measurement files
    #[arg(help = "Directory containing the .XML measurement files")]
    pub path: PathBuf,

    /// Split rows by signal status instead of writing one CSV per input
    #[arg(
        short = 'r',
        long = "rip-no-signal",
        help = "Write MPEG_TS_locked.csv and No_Signal.csv instead of one CSV per input"
    )]
    pub rip_no_signal: bool,

    /// Number of files extracted concurrently
    #[arg(
        short = 't',
        long = "max-concurrent",
        help = "Number of files extracted concurrently"
    )]
    pub max_concurrent: Option<usize>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ConvertCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(max_concurrent) = self.max_concurrent
            && max_concurrent == 0
        {
            return Err("Number of concurrent extractions must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn get_max_concurrent(&self) -> usize {
        self.max_concurrent.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        })
    }
}

/// Directory inventory tool
#[derive(Parser, Debug, Clone)]
#[command(name = "map-files")]
#[command(about = "List and size every file under a folder, with a per-extension summary")]
#[command(version)]
pub struct InventoryCli {
    /// Folder to be searched for files
    #[arg(help = "Folder to be searched for files")]
    pub path: PathBuf,

    /// Only include files with this extension (no leading dot, case-sensitive)
    #[arg(
        short = 'e',
        long = "file-extension",
        help = "Only include files with this extension (no leading dot)"
    )]
    pub file_extension: Option<String>,

    /// Where to write the report
    #[arg(
        short = 'o',
        long = "output",
        default_value = "outputs/map_files.txt",
        help = "Where to write the report"
    )]
    pub output: PathBuf,
}

impl InventoryCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.path.exists() {
            return Err(format!("Directory does not exist: {}", self.path.display()));
        }
        if !self.path.is_dir() {
            return Err(format!("Not a directory: {}", self.path.display()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_basic_convert_cli_parsing() {
        let args = vec!["xml2csv", "/tmp"];
        let cli = ConvertCli::try_parse_from(args).unwrap();
        assert_eq!(cli.path, PathBuf::from("/tmp"));
        assert!(!cli.rip_no_signal);
    }

    #[test]
    fn test_rip_flag() {
        let args = vec!["xml2csv", "--rip-no-signal", "/tmp"];
        let cli = ConvertCli::try_parse_from(args).unwrap();
        assert!(cli.rip_no_signal);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let args = vec!["xml2csv", "--quiet", "--verbose", "/tmp"];
        assert!(ConvertCli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let args = vec!["xml2csv", "--max-concurrent", "0", "/tmp"];
        let cli = ConvertCli::try_parse_from(args).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_verbosity_from_config() {
        let cli = ConvertCli::try_parse_from(vec!["xml2csv", "-q", "/tmp"]).unwrap();
        let config = ConvertConfig::from_cli(&cli);
        assert_eq!(config.verbosity(), VerbosityLevel::Quiet);
    }

    #[test]
    fn test_inventory_cli_defaults() {
        let cli = InventoryCli::try_parse_from(vec!["map-files", "/tmp"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("outputs/map_files.txt"));
        assert!(cli.file_extension.is_none());
    }

    #[test]
    fn test_inventory_extension_filter() {
        let cli =
            InventoryCli::try_parse_from(vec!["map-files", "-e", "mp3", "/tmp"]).unwrap();
        assert_eq!(cli.file_extension.as_deref(), Some("mp3"));
    }
}
