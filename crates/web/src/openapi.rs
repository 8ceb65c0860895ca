use utoipa::OpenApi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    info(title = "QR Hunt API", description = "Claim submission and scoring for the QR code hunt"),
    paths(
        features::claims::handlers::submit_claim,
        features::leaderboard::handlers::get_leaderboard,
        features::students::handlers::get_student_info,
        features::health::handlers::health_check,
    ),
    components(
        schemas(
            storage::dto::claim::SubmitClaimRequest,
            storage::dto::claim::SubmitClaimResponse,
            storage::dto::common::FailureResponse,
            storage::dto::common::HealthResponse,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::LeaderboardResponse,
            storage::dto::student::StudentInfoResponse,
            storage::models::StudentClaim,
        )
    ),
    tags(
        (name = "claims", description = "Code submission"),
        (name = "leaderboard", description = "Scores across participants"),
        (name = "students", description = "Per-participant claim history"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
