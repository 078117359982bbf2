//! Cross-origin functions called directly by the web client.
//!
//! These answer any origin and use a flat `{ "error": "..." }` body rather
//! than the `/api` error envelope.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{
        HeaderMap, HeaderValue, Method, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ORIGIN},
    },
    response::{IntoResponse, Response},
    routing::post,
};
use bizfeed_core::VerificationError;
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::error;

use crate::middleware::AppState;

/// Headers the web client sends with function calls.
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Send verification email request.
#[derive(Debug, Deserialize)]
pub struct SendVerificationRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendVerificationResponse {
    pub success: bool,
    pub message: &'static str,
    pub debug_link: String,
}

#[derive(Debug, Serialize)]
pub struct FunctionError {
    pub error: String,
}

fn error_response(err: &VerificationError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    if let VerificationError::Unexpected(ref msg) = *err {
        error!(error = %msg, "Verification request failed");
    }

    (
        status,
        Json(FunctionError {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Issue a verification token and return the link that redeems it.
async fn send_verification_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let req: SendVerificationRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => return error_response(&VerificationError::Unexpected(e.to_string())),
    };

    let origin = headers
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(state.public_origin.as_str());

    match state
        .verification_service
        .issue(
            req.user_id.as_deref().unwrap_or_default(),
            req.email.as_deref().unwrap_or_default(),
            origin,
        )
        .await
    {
        Ok(issued) => Json(SendVerificationResponse {
            success: true,
            message: "Verification email sent",
            debug_link: issued.link,
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Answer a bare `OPTIONS` that is not a CORS preflight.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Function routes with their cross-origin policy applied.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/send-verification-email",
            post(send_verification_email).options(preflight),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS]),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
}
