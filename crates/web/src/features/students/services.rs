use storage::{
    Spreadsheet,
    dto::student::StudentInfoResponse,
    error::Result,
    repository::claim::ClaimRepository,
    services::scoring::total_score,
};

/// Claims and score of one enrollment. Unknown enrollments simply have no claims.
pub async fn get_student_info(sheet: &Spreadsheet, enrollment_no: &str) -> Result<StudentInfoResponse> {
    let repo = ClaimRepository::new(sheet.tables());
    let claims = repo.student_claims(enrollment_no).await?;

    Ok(StudentInfoResponse {
        enrollment_no: enrollment_no.to_string(),
        score: total_score(&claims),
        claims,
    })
}
