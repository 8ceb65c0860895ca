use axum::{Router, routing::get};

use super::handlers::get_student_info;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/student/:enrollment_no", get(get_student_info))
}
