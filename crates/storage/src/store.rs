use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// The five sheets that make up the hunt spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    ValidEnrollments,
    ValidCodes,
    CodeMultipliers,
    ClaimTimestamps,
    StudentClaims,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::ValidEnrollments,
        Table::ValidCodes,
        Table::CodeMultipliers,
        Table::ClaimTimestamps,
        Table::StudentClaims,
    ];

    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::ValidEnrollments => "ValidEnrollments",
            Self::ValidCodes => "ValidCodes",
            Self::CodeMultipliers => "CodeMultipliers",
            Self::ClaimTimestamps => "ClaimTimestamps",
            Self::StudentClaims => "StudentClaims",
        }
    }

    /// Header row expected in row 1 of the sheet
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Self::ValidEnrollments => &["EnrollmentNo"],
            Self::ValidCodes => &["SecretCode"],
            Self::CodeMultipliers => &["SecretCode", "Multiplier"],
            Self::ClaimTimestamps => &["SecretCode", "EnrollmentNo", "Timestamp"],
            Self::StudentClaims => &["EnrollmentNo", "SecretCode", "Timestamp", "Multiplier"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(i64),
}

impl CellValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Number(n) => Value::from(*n),
        }
    }

    /// How the cell reads back from the sheet.
    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

/// A data row keyed by the sheet's header row.
pub type Record = HashMap<String, String>;

/// Column reads and row appends against named tables.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Every cell of a zero-based column, header included.
    async fn read_column(&self, table: Table, column: usize) -> Result<Vec<String>>;

    /// Every row of the table, header included.
    async fn read_rows(&self, table: Table) -> Result<Vec<Vec<String>>>;

    /// Appends a single row after the last row of the table.
    async fn append_row(&self, table: Table, cells: Vec<CellValue>) -> Result<()>;

    /// Reads the table as header-keyed records.
    async fn read_records(&self, table: Table) -> Result<Vec<Record>> {
        let rows = self.read_rows(table).await?;
        Ok(rows_to_records(rows))
    }
}

/// Turns raw rows into records using the first row as keys.
///
/// Short rows are padded with empty strings and fully blank rows are dropped.
pub fn rows_to_records(rows: Vec<Vec<String>>) -> Vec<Record> {
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    rows.filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .map(|row| {
            header
                .iter()
                .enumerate()
                .map(|(i, key)| (key.trim().to_string(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Shared handle to the spreadsheet backing the hunt.
///
/// Built once at startup and cloned into every request.
#[derive(Clone)]
pub struct Spreadsheet {
    tables: Arc<dyn TableStore>,
}

impl Spreadsheet {
    pub fn new(tables: impl TableStore + 'static) -> Self {
        Self {
            tables: Arc::new(tables),
        }
    }

    pub fn from_arc(tables: Arc<dyn TableStore>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &dyn TableStore {
        self.tables.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_rows_to_records_pads_short_rows() {
        let records = rows_to_records(vec![
            row(&["SecretCode", "Multiplier"]),
            row(&["C1", "5"]),
            row(&["C2"]),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Multiplier"], "5");
        assert_eq!(records[1]["SecretCode"], "C2");
        assert_eq!(records[1]["Multiplier"], "");
    }

    #[test]
    fn test_rows_to_records_skips_blank_rows() {
        let records = rows_to_records(vec![
            row(&["EnrollmentNo"]),
            row(&["  "]),
            row(&[]),
            row(&["E1"]),
        ]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["EnrollmentNo"], "E1");
    }

    #[test]
    fn test_empty_table_has_no_records() {
        assert!(rows_to_records(Vec::new()).is_empty());
        assert!(rows_to_records(vec![row(&["EnrollmentNo"])]).is_empty());
    }

    #[test]
    fn test_every_table_has_headers() {
        for table in Table::ALL {
            assert!(!table.headers().is_empty(), "{}", table.sheet_name());
        }
    }
}
