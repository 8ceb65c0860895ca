use crate::error::Result;
use crate::models::StudentClaim;
use crate::store::{Table, TableStore};

/// Claim history: the `StudentClaims` log and the `ClaimTimestamps` exhaustion list.
pub struct ClaimRepository<'a> {
    tables: &'a dyn TableStore,
}

impl<'a> ClaimRepository<'a> {
    pub fn new(tables: &'a dyn TableStore) -> Self {
        Self { tables }
    }

    pub async fn is_code_claimed(&self, secret_code: &str) -> Result<bool> {
        let codes = self.tables.read_column(Table::ClaimTimestamps, 0).await?;
        Ok(codes
            .iter()
            .skip(1)
            .any(|code| code.trim() == secret_code))
    }

    /// Every claim in sheet order. Rows without an enrollment are ignored.
    pub async fn all_claims(&self) -> Result<Vec<StudentClaim>> {
        let records = self.tables.read_records(Table::StudentClaims).await?;

        let mut claims = Vec::with_capacity(records.len());
        for record in &records {
            let claim = StudentClaim::from_record(record)?;
            if !claim.enrollment_no.is_empty() {
                claims.push(claim);
            }
        }

        Ok(claims)
    }

    pub async fn student_claims(&self, enrollment_no: &str) -> Result<Vec<StudentClaim>> {
        let claims = self.all_claims().await?;
        Ok(claims
            .into_iter()
            .filter(|claim| claim.enrollment_no == enrollment_no)
            .collect())
    }

    /// Appends the claim to `StudentClaims`, then marks the code in `ClaimTimestamps`.
    ///
    /// The two appends are independent: if the second fails, the first stays.
    pub async fn record_claim(&self, claim: &StudentClaim) -> Result<()> {
        self.tables
            .append_row(Table::StudentClaims, claim.to_row())
            .await?;

        self.tables
            .append_row(Table::ClaimTimestamps, claim.claim_timestamp().to_row())
            .await?;

        Ok(())
    }
}
