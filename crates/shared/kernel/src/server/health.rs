use super::state::ApiState;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use hhub_derive::{api_handler, api_model};
use hhub_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::warn;

/// Health check response
#[api_model]
struct HealthResponse {
    /// `up` when the database answers, `degraded` otherwise
    status: String,
    version: String,
    /// Uptime in seconds
    uptime: u64,
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

#[api_handler(
    get,
    path = "/",
    responses((status = OK, description = "Landing page", body = String, content_type = "text/html")),
    tag = SYSTEM_TAG,
)]
pub(super) async fn index_handler() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Healthcheck endpoint", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let status = match state.database.health().await {
        Ok(()) => "up",
        Err(e) => {
            warn!(error = %e, "Health check could not reach the database");
            "degraded"
        }
    };

    let body = HealthResponse {
        status: status.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: START_TIME.elapsed().as_secs(),
    };

    (
        [
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
            (header::PRAGMA, "no-cache"),
        ],
        axum::Json(body),
    )
}
