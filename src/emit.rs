//! CSV emission for tabulated measurement documents

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::table::Table;

/// Fixed output name for locked-signal rows in split mode
pub const LOCKED_FILE_NAME: &str = "MPEG_TS_locked.csv";

/// Fixed output name for no-signal rows in split mode
pub const NO_SIGNAL_FILE_NAME: &str = "No_Signal.csv";

/// Writes rectangular tables as delimited text
pub struct CsvEmitter;

impl CsvEmitter {
    /// Write a table: header row of column names, one record per test point
    pub fn write_table(table: &Table, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(table.columns().iter().map(|c| c.name.as_str()))?;
        for row in 0..table.rows() {
            writer.write_record(table.columns().iter().map(|c| c.values[row].as_str()))?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Output path for an input file: extension stripped, `.csv` appended
    pub fn output_path(input: &Path) -> PathBuf {
        input.with_extension("csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{ColumnSet, Table};
    use tempfile::TempDir;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_output_path_strips_input_extension() {
        assert_eq!(
            CsvEmitter::output_path(Path::new("/data/SITE_A.XML")),
            PathBuf::from("/data/SITE_A.csv")
        );
    }

    #[test]
    fn test_write_table_round_trips_header_and_rows() {
        let mut set = ColumnSet::new();
        set.push("TEST POINT", strings(&["1", "2"]));
        set.push("CH15 - STATUS", strings(&["MPEG2 TS locked", "No signal received"]));
        let table = Table::build(set).into_table().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        CsvEmitter::write_table(&table, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("TEST POINT,CH15 - STATUS"));
        assert_eq!(lines.next(), Some("1,MPEG2 TS locked"));
        assert_eq!(lines.next(), Some("2,No signal received"));
        assert_eq!(lines.next(), None);
    }
}
