use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{claims, health, leaderboard, students};
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(claims::routes::routes())
        .merge(leaderboard::routes::routes())
        .merge(students::routes::routes())
        .merge(health::routes::routes())
}

/// The full application: API under `/api`, Swagger UI, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api", api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
