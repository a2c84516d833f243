//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use roster_app::ports::{LogRepository, UserRepository};

use crate::state::AppState;

/// Greeting served at `/`.
pub const WELCOME: &str = "Welcome to the User Management API!";

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` next to the root greeting and `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<UR, LR>(state: AppState<UR, LR>) -> Router
where
    UR: UserRepository + Send + Sync + 'static,
    LR: LogRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn health_check() -> &'static str {
    "OK"
}
