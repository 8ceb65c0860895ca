use storage::{
    Spreadsheet,
    dto::leaderboard::LeaderboardEntry,
    error::Result,
    repository::claim::ClaimRepository,
    services::scoring::build_leaderboard,
};

/// Totals per enrollment over the whole claim log
pub async fn get_leaderboard(sheet: &Spreadsheet) -> Result<Vec<LeaderboardEntry>> {
    let repo = ClaimRepository::new(sheet.tables());
    let claims = repo.all_claims().await?;
    Ok(build_leaderboard(&claims))
}
