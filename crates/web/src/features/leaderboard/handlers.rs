use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::{common::FailureResponse, leaderboard::LeaderboardResponse};

use crate::error::WebResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Scores of every participant, highest first", body = LeaderboardResponse),
        (status = 500, description = "Spreadsheet unavailable", body = FailureResponse)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(State(state): State<AppState>) -> WebResult<Response> {
    let leaderboard = services::get_leaderboard(&state.sheet).await?;

    Ok(Json(LeaderboardResponse { leaderboard }).into_response())
}
