use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        claim::{ClaimSubmission, SubmitClaimRequest, SubmitClaimResponse},
        common::FailureResponse,
    },
    services::claiming::ClaimOutcome,
};
use validator::Validate;

use crate::error::WebResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/submit",
    request_body = SubmitClaimRequest,
    responses(
        (status = 200, description = "Code claimed, returns the new total score", body = SubmitClaimResponse),
        (status = 400, description = "Missing data, invalid enrollment, invalid code or already claimed", body = FailureResponse),
        (status = 500, description = "Spreadsheet unavailable", body = FailureResponse)
    ),
    tag = "claims"
)]
pub async fn submit_claim(
    State(state): State<AppState>,
    payload: Result<Json<SubmitClaimRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(request) = payload?;
    let submission = ClaimSubmission::from(request);

    submission.validate()?;

    match services::submit_claim(&state, &submission).await? {
        ClaimOutcome::Accepted(receipt) => {
            tracing::info!(
                enrollment_no = %receipt.claim.enrollment_no,
                secret_code = %receipt.claim.secret_code,
                multiplier = receipt.claim.multiplier,
                score = receipt.score,
                "Code claimed"
            );
            Ok(Json(SubmitClaimResponse::accepted(receipt.score)).into_response())
        }
        ClaimOutcome::Rejected(rejection) => {
            tracing::info!(
                enrollment_no = %submission.enrollment_no,
                secret_code = %submission.secret_code,
                reason = %rejection,
                "Claim rejected"
            );
            Err(rejection.into())
        }
    }
}
