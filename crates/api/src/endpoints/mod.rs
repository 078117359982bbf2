//! API endpoints.

mod feed;
mod health;
mod posts;
mod verification;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/feed", feed::router())
        .nest("/posts", posts::router())
        .nest("/verify-email", verification::router())
        .nest("/health", health::router())
}
