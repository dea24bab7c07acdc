//! Rectangular tables built from extracted measurement columns
//!
//! A document flattens into an insertion-ordered [`ColumnSet`]; building a
//! [`Table`] from it either succeeds or degrades to the list of measurement
//! columns that came back empty, so the operator learns exactly what the
//! source file is missing.

use crate::error::{RangerError, Result};

/// Status value written by the meter when the transport stream is locked
pub const LOCKED_STATUS: &str = "MPEG2 TS locked";

/// Status value written by the meter when no signal was received
pub const NO_SIGNAL_STATUS: &str = "No signal received";

/// One named column of cell values, positionally aligned with test points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Insertion-ordered set of columns extracted from one document
///
/// Order is part of the observable contract: CSV headers come out in the
/// order columns were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.columns.push(Column::new(name, values));
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A rectangular table: every column has exactly `rows` values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

/// Outcome of attempting to tabulate a document
///
/// `MissingColumns` is a degraded value, not an error: it names the columns
/// whose sequences came back empty so the caller can report them, and the
/// batch carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableResult {
    Table(Table),
    MissingColumns(Vec<String>),
}

impl TableResult {
    pub fn is_table(&self) -> bool {
        matches!(self, TableResult::Table(_))
    }

    pub fn into_table(self) -> Option<Table> {
        match self {
            TableResult::Table(table) => Some(table),
            TableResult::MissingColumns(_) => None,
        }
    }
}

impl Table {
    /// Tabulate a column set
    ///
    /// Succeeds only when every column has the same non-zero length.
    /// Otherwise returns the names of the zero-length columns (possibly
    /// none, when columns are merely unequal).
    pub fn build(set: ColumnSet) -> TableResult {
        let columns = set.into_columns();
        let rows = columns.first().map(|c| c.values.len()).unwrap_or(0);

        if rows > 0 && columns.iter().all(|c| c.values.len() == rows) {
            return TableResult::Table(Self { columns, rows });
        }

        TableResult::MissingColumns(
            columns
                .iter()
                .filter(|c| c.values.is_empty())
                .map(|c| c.name.clone())
                .collect(),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Vertically concatenate tables
    ///
    /// Columns are the union in first-seen order; cells absent from a source
    /// table are left empty. Row order is input order, then document order.
    pub fn concat(tables: Vec<Table>) -> Table {
        let mut names: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !names.contains(&column.name) {
                    names.push(column.name.clone());
                }
            }
        }

        let rows = tables.iter().map(|t| t.rows).sum();
        let columns = names
            .into_iter()
            .map(|name| {
                let mut values = Vec::with_capacity(rows);
                for table in &tables {
                    match table.columns.iter().find(|c| c.name == name) {
                        Some(column) => values.extend(column.values.iter().cloned()),
                        None => values.extend(std::iter::repeat_n(String::new(), table.rows)),
                    }
                }
                Column::new(name, values)
            })
            .collect();

        Table { columns, rows }
    }

    /// Keep only the rows at the given indices, preserving order
    fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                Column::new(
                    column.name.clone(),
                    indices.iter().map(|&i| column.values[i].clone()).collect(),
                )
            })
            .collect();
        Table {
            columns,
            rows: indices.len(),
        }
    }
}

/// Result of partitioning a table by signal status
#[derive(Debug, Clone)]
pub struct StatusSplit {
    pub locked: Table,
    pub no_signal: Table,
    /// Rows whose status matched neither recognized value
    pub dropped: usize,
}

/// Partition rows by the STATUS measurement
///
/// The status column is the one whose name contains `STATUS` (column naming
/// makes it unique per document). Rows matching neither recognized value are
/// dropped from both outputs; the count is surfaced so the loss is visible.
pub fn split_by_status(table: &Table) -> Result<StatusSplit> {
    let status = table
        .columns()
        .iter()
        .find(|c| c.name.contains("STATUS"))
        .ok_or(RangerError::MissingStatusColumn)?;

    let mut locked = Vec::new();
    let mut no_signal = Vec::new();
    let mut dropped = 0;
    for (index, value) in status.values.iter().enumerate() {
        match value.as_str() {
            LOCKED_STATUS => locked.push(index),
            NO_SIGNAL_STATUS => no_signal.push(index),
            _ => dropped += 1,
        }
    }

    Ok(StatusSplit {
        locked: table.select_rows(&locked),
        no_signal: table.select_rows(&no_signal),
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn rectangular_set() -> ColumnSet {
        let mut set = ColumnSet::new();
        set.push("TEST POINT", strings(&["1", "2", "3"]));
        set.push("CH15 - POWER (dBuV)", strings(&["45.1", "44.8", "46.0"]));
        set.push(
            "CH15 - STATUS",
            strings(&[LOCKED_STATUS, NO_SIGNAL_STATUS, LOCKED_STATUS]),
        );
        set
    }

    #[test]
    fn test_build_rectangular() {
        let result = Table::build(rectangular_set());
        let table = result.into_table().expect("expected a table");
        assert_eq!(table.rows(), 3);
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn test_build_names_empty_columns() {
        let mut set = rectangular_set();
        set.push("CH15 - CN (dB)", Vec::new());
        set.push("CH15 - MER (dB)", Vec::new());

        match Table::build(set) {
            TableResult::MissingColumns(names) => {
                assert_eq!(names, vec!["CH15 - CN (dB)", "CH15 - MER (dB)"]);
            }
            TableResult::Table(_) => panic!("expected MissingColumns"),
        }
    }

    #[test]
    fn test_build_unequal_but_nonempty() {
        let mut set = ColumnSet::new();
        set.push("TEST POINT", strings(&["1", "2"]));
        set.push("LATITUDE", strings(&["14.59"]));

        // Non-tabular, but no column is outright missing
        match Table::build(set) {
            TableResult::MissingColumns(names) => assert!(names.is_empty()),
            TableResult::Table(_) => panic!("expected MissingColumns"),
        }
    }

    #[test]
    fn test_build_empty_document() {
        let mut set = ColumnSet::new();
        set.push("TEST POINT", Vec::new());

        match Table::build(set) {
            TableResult::MissingColumns(names) => assert_eq!(names, vec!["TEST POINT"]),
            TableResult::Table(_) => panic!("expected MissingColumns"),
        }
    }

    #[test]
    fn test_concat_preserves_order_and_fills_gaps() {
        let mut first = ColumnSet::new();
        first.push("TEST POINT", strings(&["1", "2"]));
        first.push("CH15 - POWER (dBuV)", strings(&["45.1", "44.8"]));

        let mut second = ColumnSet::new();
        second.push("TEST POINT", strings(&["1"]));
        second.push("CH18 - POWER (dBuV)", strings(&["41.2"]));

        let combined = Table::concat(vec![
            Table::build(first).into_table().unwrap(),
            Table::build(second).into_table().unwrap(),
        ]);

        assert_eq!(combined.rows(), 3);
        let names: Vec<&str> = combined.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["TEST POINT", "CH15 - POWER (dBuV)", "CH18 - POWER (dBuV)"]
        );

        let ch18 = &combined.columns()[2];
        assert_eq!(ch18.values, strings(&["", "", "41.2"]));
    }

    #[test]
    fn test_split_partitions_rows() {
        let table = Table::build(rectangular_set()).into_table().unwrap();
        let split = split_by_status(&table).unwrap();

        assert_eq!(split.locked.rows(), 2);
        assert_eq!(split.no_signal.rows(), 1);
        assert_eq!(split.dropped, 0);

        let ids = &split.locked.columns()[0];
        assert_eq!(ids.values, strings(&["1", "3"]));
    }

    #[test]
    fn test_split_counts_unrecognized_statuses() {
        let mut set = ColumnSet::new();
        set.push("TEST POINT", strings(&["1", "2", "3"]));
        set.push(
            "CH15 - STATUS",
            strings(&[LOCKED_STATUS, "Searching", NO_SIGNAL_STATUS]),
        );
        let table = Table::build(set).into_table().unwrap();

        let split = split_by_status(&table).unwrap();
        assert_eq!(split.locked.rows(), 1);
        assert_eq!(split.no_signal.rows(), 1);
        assert_eq!(split.dropped, 1);
    }

    #[test]
    fn test_split_without_status_column() {
        let mut set = ColumnSet::new();
        set.push("TEST POINT", strings(&["1"]));
        let table = Table::build(set).into_table().unwrap();

        match split_by_status(&table) {
            Err(RangerError::MissingStatusColumn) => {}
            other => panic!("expected MissingStatusColumn, got {:?}", other.map(|_| ())),
        }
    }
}
