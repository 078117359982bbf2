//! Feed endpoints.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use bizfeed_common::AppResult;
use bizfeed_core::{CurrentUser, FeedControls, FeedPost, FeedRender, FeedTab, FeedView};
use bizfeed_db::entities::{business, post, profile};
use serde::{Deserialize, Serialize};

use crate::{extractors::MaybeAuthUser, middleware::AppState, response::ApiResponse};

/// Feed query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// `for-you` or `following`; anything else reads as `for-you`.
    #[serde(default)]
    pub tab: Option<String>,
}

/// Post response.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub youtube_url: Option<String>,
    pub instagram_url: Option<String>,
    pub created_at: String,
    pub user_id: String,
    pub business_id: Option<String>,
}

impl From<post::Model> for PostResponse {
    fn from(post: post::Model) -> Self {
        Self {
            id: post.id,
            content: post.content,
            image_url: post.image_url,
            youtube_url: post.youtube_url,
            instagram_url: post.instagram_url,
            created_at: post.created_at.to_rfc3339(),
            user_id: post.user_id,
            business_id: post.business_id,
        }
    }
}

/// Post author.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<profile::Model> for AuthorResponse {
    fn from(profile: profile::Model) -> Self {
        Self {
            id: profile.id,
            full_name: profile.full_name,
            username: profile.username,
            avatar_url: profile.avatar_url,
        }
    }
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BusinessResponse {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
}

impl From<business::Model> for BusinessResponse {
    fn from(business: business::Model) -> Self {
        Self {
            id: business.id,
            name: business.name,
            logo_url: business.logo_url,
        }
    }
}

/// A feed card.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FeedPostResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub author: Option<AuthorResponse>,
    pub business: Option<BusinessResponse>,
    pub likes_count: usize,
    pub comments_count: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub liked_by_me: bool,
}

impl FeedPostResponse {
    fn new(item: &FeedPost, viewer: Option<&CurrentUser>) -> Self {
        Self {
            post: item.post.clone().into(),
            author: item.author.clone().map(Into::into),
            business: item.business.clone().map(Into::into),
            likes_count: item.likes_count(),
            comments_count: item.comments_count(),
            liked_by_me: viewer.is_some_and(|u| item.is_liked_by(&u.id)),
        }
    }
}

/// What the feed shows.
#[derive(Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RenderResponse {
    Loading { placeholders: usize },
    Posts { posts: Vec<FeedPostResponse> },
    Empty { message: &'static str },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsResponse {
    pub can_create_post: bool,
    pub following_tab_enabled: bool,
}

impl From<FeedControls> for ControlsResponse {
    fn from(controls: FeedControls) -> Self {
        Self {
            can_create_post: controls.can_create_post,
            following_tab_enabled: controls.following_tab_enabled,
        }
    }
}

/// Rendered feed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub tab: FeedTab,
    pub view: RenderResponse,
    pub controls: ControlsResponse,
}

impl From<&FeedView> for FeedResponse {
    fn from(view: &FeedView) -> Self {
        let rendered = match view.render() {
            FeedRender::Loading { placeholders } => RenderResponse::Loading { placeholders },
            FeedRender::Posts(posts) => RenderResponse::Posts {
                posts: posts
                    .iter()
                    .map(|p| FeedPostResponse::new(p, view.user()))
                    .collect(),
            },
            FeedRender::Empty { message } => RenderResponse::Empty { message },
        };

        Self {
            tab: view.tab(),
            view: rendered,
            controls: view.controls().into(),
        }
    }
}

/// Load a feed view for `user` on `tab`.
pub(crate) async fn load_view(
    state: &AppState,
    tab: FeedTab,
    user: Option<CurrentUser>,
) -> FeedView {
    let mut view = FeedView::new(state.feed_service.clone());
    view.set_tab(tab).await;
    view.auth_initialized(user).await;
    view
}

/// Get the feed for a tab.
async fn show(
    MaybeAuthUser(user): MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<ApiResponse<FeedResponse>> {
    let tab = FeedTab::parse(query.tab.as_deref().unwrap_or_default());
    let view = load_view(&state, tab, user).await;

    Ok(ApiResponse::ok(FeedResponse::from(&view)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show))
}
