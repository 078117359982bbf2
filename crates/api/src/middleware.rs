//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use bizfeed_core::{AuthService, FeedService, PostService, VerificationService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub feed_service: FeedService,
    pub post_service: PostService,
    pub verification_service: VerificationService,
    pub auth_service: AuthService,
    /// Fallback for links when a request has no `Origin`.
    pub public_origin: String,
}

/// Authentication middleware.
///
/// A valid bearer token puts a `CurrentUser` in the request extensions. A
/// missing or invalid token leaves the request anonymous; handlers that need
/// a user reject it themselves.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get(AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.auth_service.authenticate(token)
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
