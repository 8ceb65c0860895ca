use std::fmt;

use crate::dto::claim::ClaimSubmission;
use crate::error::Result;
use crate::models::{ClaimClock, StudentClaim};
use crate::repository::{claim::ClaimRepository, reference::ReferenceRepository};
use crate::services::scoring::total_score;
use crate::store::TableStore;

/// Why a well-formed submission was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimRejection {
    InvalidEnrollment,
    InvalidCode,
    AlreadyClaimed,
}

impl ClaimRejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidEnrollment => "Invalid enrollment",
            Self::InvalidCode => "Invalid code",
            Self::AlreadyClaimed => "Already claimed",
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyClaimed)
    }
}

impl fmt::Display for ClaimRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub claim: StudentClaim,
    /// Submitter's total after this claim, recomputed from the sheet
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Accepted(ClaimReceipt),
    Rejected(ClaimRejection),
}

/// Validates a submission against the reference sheets and records it.
///
/// Checks run in order: enrollment, code, already claimed. Callers must
/// serialize calls for the claimed check and the append to be atomic.
pub async fn submit_claim(
    tables: &dyn TableStore,
    submission: &ClaimSubmission,
    clock: &ClaimClock,
) -> Result<ClaimOutcome> {
    let references = ReferenceRepository::new(tables);
    let claims = ClaimRepository::new(tables);

    if !references
        .is_valid_enrollment(&submission.enrollment_no)
        .await?
    {
        return Ok(ClaimOutcome::Rejected(ClaimRejection::InvalidEnrollment));
    }

    if !references.is_valid_code(&submission.secret_code).await? {
        return Ok(ClaimOutcome::Rejected(ClaimRejection::InvalidCode));
    }

    if claims.is_code_claimed(&submission.secret_code).await? {
        return Ok(ClaimOutcome::Rejected(ClaimRejection::AlreadyClaimed));
    }

    let multiplier = references.code_multiplier(&submission.secret_code).await?;
    let claim = StudentClaim {
        enrollment_no: submission.enrollment_no.clone(),
        secret_code: submission.secret_code.clone(),
        timestamp: clock.now(),
        multiplier,
    };

    claims.record_claim(&claim).await?;

    let history = claims.student_claims(&submission.enrollment_no).await?;
    let score = total_score(&history);

    Ok(ClaimOutcome::Accepted(ClaimReceipt { claim, score }))
}
