use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::multiplier::parse_multiplier;
use crate::error::Result;
use crate::store::{CellValue, Record};

/// One row of the `StudentClaims` sheet.
///
/// Field names serialize with the sheet's column headers so API responses
/// mirror the sheet layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentClaim {
    #[serde(rename = "EnrollmentNo")]
    pub enrollment_no: String,
    #[serde(rename = "SecretCode")]
    pub secret_code: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// Multiplier of the code when it was claimed
    #[serde(rename = "Multiplier")]
    pub multiplier: i64,
}

impl StudentClaim {
    pub fn from_record(record: &Record) -> Result<Self> {
        let field = |name: &str| {
            record
                .get(name)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        Ok(Self {
            enrollment_no: field("EnrollmentNo"),
            secret_code: field("SecretCode"),
            timestamp: field("Timestamp"),
            multiplier: parse_multiplier(&field("Multiplier"))?,
        })
    }

    /// Cells in `StudentClaims` column order: EnrollmentNo, SecretCode, Timestamp, Multiplier.
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.enrollment_no.clone()),
            CellValue::Text(self.secret_code.clone()),
            CellValue::Text(self.timestamp.clone()),
            CellValue::Number(self.multiplier),
        ]
    }

    pub fn claim_timestamp(&self) -> ClaimTimestamp {
        ClaimTimestamp {
            secret_code: self.secret_code.clone(),
            enrollment_no: self.enrollment_no.clone(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// One row of the `ClaimTimestamps` sheet. A code listed here is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimTimestamp {
    pub secret_code: String,
    pub enrollment_no: String,
    pub timestamp: String,
}

impl ClaimTimestamp {
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::Text(self.secret_code.clone()),
            CellValue::Text(self.enrollment_no.clone()),
            CellValue::Text(self.timestamp.clone()),
        ]
    }
}
