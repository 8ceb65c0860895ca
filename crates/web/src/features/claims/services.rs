use storage::{
    dto::claim::ClaimSubmission,
    error::Result,
    services::claiming::{self, ClaimOutcome},
};

use crate::state::AppState;

/// Submit a claim while holding the claim lock
pub async fn submit_claim(state: &AppState, submission: &ClaimSubmission) -> Result<ClaimOutcome> {
    let _guard = state.lock_claims().await;
    claiming::submit_claim(state.sheet.tables(), submission, &state.clock).await
}
