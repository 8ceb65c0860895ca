use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::StudentClaim;

/// Claims and total score of one enrollment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentInfoResponse {
    pub enrollment_no: String,
    pub score: i64,
    pub claims: Vec<StudentClaim>,
}
