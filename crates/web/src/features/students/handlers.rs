use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::dto::{common::FailureResponse, student::StudentInfoResponse};

use crate::error::WebResult;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/student/{enrollment_no}",
    params(
        ("enrollment_no" = String, Path, description = "Enrollment number")
    ),
    responses(
        (status = 200, description = "Claims and total score of the enrollment", body = StudentInfoResponse),
        (status = 500, description = "Spreadsheet unavailable", body = FailureResponse)
    ),
    tag = "students"
)]
pub async fn get_student_info(
    State(state): State<AppState>,
    Path(enrollment_no): Path<String>,
) -> WebResult<Response> {
    let info = services::get_student_info(&state.sheet, &enrollment_no).await?;

    Ok(Json(info).into_response())
}
