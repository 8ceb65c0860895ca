use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::{Result, StorageError};
use crate::store::{CellValue, Table, TableStore};

/// Reference data used to seed an in-memory spreadsheet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemorySeed {
    #[serde(default)]
    pub enrollments: Vec<String>,
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub multipliers: BTreeMap<String, i64>,
}

impl MemorySeed {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            StorageError::Configuration(format!("cannot read seed file {}: {}", path.display(), e))
        })?;

        Ok(serde_json::from_str(&contents)?)
    }
}

/// A spreadsheet held in process memory.
///
/// Every table starts with its header row, so reads behave like a freshly
/// provisioned sheet.
pub struct MemoryTables {
    tables: RwLock<HashMap<Table, Vec<Vec<String>>>>,
}

impl MemoryTables {
    pub fn new() -> Self {
        let tables = Table::ALL
            .into_iter()
            .map(|table| {
                let header = table.headers().iter().map(|h| h.to_string()).collect();
                (table, vec![header])
            })
            .collect();

        Self {
            tables: RwLock::new(tables),
        }
    }

    pub fn from_seed(seed: MemorySeed) -> Self {
        let mut store = Self::new()
            .with_enrollments(seed.enrollments)
            .with_codes(seed.codes);
        for (code, multiplier) in seed.multipliers {
            store = store.with_multiplier(code, multiplier);
        }
        store
    }

    pub fn with_enrollments<I, S>(mut self, enrollments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = self.table_mut(Table::ValidEnrollments);
        rows.extend(enrollments.into_iter().map(|e| vec![e.into()]));
        self
    }

    pub fn with_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = self.table_mut(Table::ValidCodes);
        rows.extend(codes.into_iter().map(|c| vec![c.into()]));
        self
    }

    pub fn with_multiplier(mut self, code: impl Into<String>, multiplier: i64) -> Self {
        self.table_mut(Table::CodeMultipliers)
            .push(vec![code.into(), multiplier.to_string()]);
        self
    }

    /// Pushes a raw row, bypassing any typing. Useful to mimic hand-edited sheets.
    pub fn with_row(mut self, table: Table, cells: &[&str]) -> Self {
        self.table_mut(table)
            .push(cells.iter().map(|c| c.to_string()).collect());
        self
    }

    fn table_mut(&mut self, table: Table) -> &mut Vec<Vec<String>> {
        self.tables.get_mut().entry(table).or_default()
    }
}

impl Default for MemoryTables {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for MemoryTables {
    async fn read_column(&self, table: Table, column: usize) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        let column = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .map(|row| row.get(column).cloned().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        Ok(column)
    }

    async fn read_rows(&self, table: Table) -> Result<Vec<Vec<String>>> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    async fn append_row(&self, table: Table, cells: Vec<CellValue>) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .entry(table)
            .or_default()
            .push(cells.iter().map(CellValue::display).collect());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_tables_only_have_headers() {
        let store = MemoryTables::new();
        let rows = store.read_rows(Table::StudentClaims).await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["EnrollmentNo", "SecretCode", "Timestamp", "Multiplier"]);
    }

    #[tokio::test]
    async fn test_append_then_read_column() {
        let store = MemoryTables::new();
        store
            .append_row(
                Table::ClaimTimestamps,
                vec![
                    CellValue::Text("C1".to_string()),
                    CellValue::Text("E1".to_string()),
                    CellValue::Text("2026-02-14 10:00:00".to_string()),
                ],
            )
            .await
            .unwrap();

        let codes = store.read_column(Table::ClaimTimestamps, 0).await.unwrap();
        assert_eq!(codes, vec!["SecretCode", "C1"]);
    }

    #[tokio::test]
    async fn test_seed_populates_reference_tables() {
        let seed: MemorySeed = serde_json::from_str(
            r#"{"enrollments": ["E1", "E2"], "codes": ["C1"], "multipliers": {"C1": 3}}"#,
        )
        .unwrap();
        let store = MemoryTables::from_seed(seed);

        let enrollments = store.read_column(Table::ValidEnrollments, 0).await.unwrap();
        assert_eq!(enrollments, vec!["EnrollmentNo", "E1", "E2"]);

        let records = store.read_records(Table::CodeMultipliers).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Multiplier"], "3");
    }
}
