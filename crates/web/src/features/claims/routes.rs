use axum::{Router, routing::post};

use super::handlers::submit_claim;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/submit", post(submit_claim))
}
