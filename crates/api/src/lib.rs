//! HTTP API layer for bizfeed.
//!
//! - **Endpoints**: feed, posts, email verification and health under `/api`
//! - **Functions**: the cross-origin verification issuer under `/functions`
//! - **Middleware**: bearer token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod functions;
pub mod middleware;
pub mod response;

use axum::{Router, middleware::from_fn_with_state};

pub use endpoints::router;
pub use middleware::AppState;

/// Build the application with every route and the auth layer applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", endpoints::router())
        .nest("/functions", functions::router())
        .layer(from_fn_with_state(state.clone(), middleware::auth_middleware))
        .with_state(state)
}
