//! Post endpoints.

use axum::{Json, Router, extract::State, routing::post};
use bizfeed_common::AppResult;
use bizfeed_core::{CreatePostInput, FeedTab};
use serde::{Deserialize, Serialize};

use super::feed::{FeedResponse, PostResponse, load_view};
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(flatten)]
    pub input: CreatePostInput,
    /// Tab of the feed returned alongside the post.
    #[serde(default)]
    pub tab: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub post: PostResponse,
    pub feed: FeedResponse,
}

/// Publish a post and return the refreshed feed.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<ApiResponse<CreatePostResponse>> {
    let post = state.post_service.create(&user, req.input).await?;

    // Loaded after the insert so the new post is part of it.
    let tab = FeedTab::parse(req.tab.as_deref().unwrap_or_default());
    let view = load_view(&state, tab, Some(user)).await;

    Ok(ApiResponse::ok(CreatePostResponse {
        post: post.into(),
        feed: FeedResponse::from(&view),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create))
}
