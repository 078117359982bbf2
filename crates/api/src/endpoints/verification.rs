//! Email verification redemption.

use axum::{Json, Router, extract::State, routing::post};
use bizfeed_common::AppResult;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    #[serde(default)]
    pub token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> AppResult<ApiResponse<VerifyEmailResponse>> {
    let profile = state.verification_service.redeem(&req.token).await?;

    Ok(ApiResponse::ok(VerifyEmailResponse {
        user_id: profile.id,
        email: profile.email,
        email_verified: profile.email_verified,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(verify))
}
