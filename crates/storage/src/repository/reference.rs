use crate::error::Result;
use crate::models::{CodeMultiplier, DEFAULT_MULTIPLIER, parse_multiplier};
use crate::store::{Table, TableStore};

/// Read-only access to the sheets provisioned before the event.
pub struct ReferenceRepository<'a> {
    tables: &'a dyn TableStore,
}

impl<'a> ReferenceRepository<'a> {
    pub fn new(tables: &'a dyn TableStore) -> Self {
        Self { tables }
    }

    pub async fn valid_enrollments(&self) -> Result<Vec<String>> {
        self.reference_list(Table::ValidEnrollments).await
    }

    pub async fn valid_codes(&self) -> Result<Vec<String>> {
        self.reference_list(Table::ValidCodes).await
    }

    pub async fn is_valid_enrollment(&self, enrollment_no: &str) -> Result<bool> {
        let enrollments = self.valid_enrollments().await?;
        Ok(enrollments.iter().any(|e| e == enrollment_no))
    }

    pub async fn is_valid_code(&self, secret_code: &str) -> Result<bool> {
        let codes = self.valid_codes().await?;
        Ok(codes.iter().any(|c| c == secret_code))
    }

    pub async fn multipliers(&self) -> Result<Vec<CodeMultiplier>> {
        let records = self.tables.read_records(Table::CodeMultipliers).await?;

        records
            .iter()
            .filter_map(|record| {
                let code = record.get("SecretCode")?.trim();
                if code.is_empty() {
                    return None;
                }
                let cell = record.get("Multiplier").map(String::as_str).unwrap_or("");
                Some(parse_multiplier(cell).map(|multiplier| CodeMultiplier {
                    secret_code: code.to_string(),
                    multiplier,
                }))
            })
            .collect()
    }

    /// Multiplier for a code. The first matching row wins; codes without a row score the default.
    pub async fn code_multiplier(&self, secret_code: &str) -> Result<i64> {
        let records = self.tables.read_records(Table::CodeMultipliers).await?;

        let matching = records.iter().find(|record| {
            record
                .get("SecretCode")
                .is_some_and(|code| code.trim() == secret_code)
        });

        match matching {
            Some(record) => {
                let cell = record.get("Multiplier").map(String::as_str).unwrap_or("");
                parse_multiplier(cell)
            }
            None => Ok(DEFAULT_MULTIPLIER),
        }
    }

    /// Column A below the header, trimmed, blanks dropped.
    async fn reference_list(&self, table: Table) -> Result<Vec<String>> {
        let column = self.tables.read_column(table, 0).await?;

        Ok(column
            .into_iter()
            .skip(1)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::memory::MemoryTables;

    fn tables() -> MemoryTables {
        MemoryTables::new()
            .with_enrollments(["E1", "  E2  ", ""])
            .with_codes(["C1", "C2"])
            .with_multiplier("C1", 5)
    }

    #[tokio::test]
    async fn test_reference_lists_skip_header_and_blanks() {
        let tables = tables();
        let repo = ReferenceRepository::new(&tables);

        assert_eq!(repo.valid_enrollments().await.unwrap(), vec!["E1", "E2"]);
        assert_eq!(repo.valid_codes().await.unwrap(), vec!["C1", "C2"]);
    }

    #[tokio::test]
    async fn test_header_is_not_a_valid_enrollment() {
        let tables = tables();
        let repo = ReferenceRepository::new(&tables);

        assert!(repo.is_valid_enrollment("E2").await.unwrap());
        assert!(!repo.is_valid_enrollment("EnrollmentNo").await.unwrap());
        assert!(!repo.is_valid_code("SecretCode").await.unwrap());
    }

    #[tokio::test]
    async fn test_code_multiplier_defaults_to_one() {
        let tables = tables();
        let repo = ReferenceRepository::new(&tables);

        assert_eq!(repo.code_multiplier("C1").await.unwrap(), 5);
        assert_eq!(repo.code_multiplier("C2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_first_multiplier_row_wins() {
        let tables = tables().with_multiplier("C1", 9);
        let repo = ReferenceRepository::new(&tables);

        assert_eq!(repo.code_multiplier("C1").await.unwrap(), 5);
        assert_eq!(repo.multipliers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_garbage_multiplier_is_reported() {
        let tables = tables().with_row(Table::CodeMultipliers, &["C2", "lots"]);
        let repo = ReferenceRepository::new(&tables);

        assert!(matches!(
            repo.code_multiplier("C2").await,
            Err(StorageError::Malformed(_))
        ));
    }
}
