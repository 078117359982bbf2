//! Post service.

use bizfeed_common::{AppError, AppResult, IdGenerator};
use bizfeed_db::{
    entities::post,
    repositories::{BusinessRepository, PostRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::services::auth::CurrentUser;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    business_repo: BusinessRepository,
    id_gen: IdGenerator,
}

/// Input for creating a new post.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    #[validate(length(max = 5000))]
    pub content: Option<String>,

    #[validate(length(max = 2048))]
    pub image_url: Option<String>,

    #[validate(length(max = 2048))]
    pub youtube_url: Option<String>,

    #[validate(length(max = 2048))]
    pub instagram_url: Option<String>,

    /// Publish as this business (must be owned by the author).
    pub business_id: Option<String>,
}

impl CreatePostInput {
    fn has_body(&self) -> bool {
        [
            &self.content,
            &self.image_url,
            &self.youtube_url,
            &self.instagram_url,
        ]
        .into_iter()
        .flatten()
        .any(|s| !s.trim().is_empty())
    }
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, business_repo: BusinessRepository) -> Self {
        Self {
            post_repo,
            business_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Publish a post as `user`.
    pub async fn create(
        &self,
        user: &CurrentUser,
        input: CreatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        if !input.has_body() {
            return Err(AppError::BadRequest(
                "Content or media required".to_string(),
            ));
        }

        if let Some(ref business_id) = input.business_id {
            let business = self.business_repo.get_by_id(business_id).await?;
            if business.owner_id != user.id {
                return Err(AppError::Forbidden(
                    "Not the owner of this business".to_string(),
                ));
            }
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            content: Set(input.content),
            image_url: Set(input.image_url),
            youtube_url: Set(input.youtube_url),
            instagram_url: Set(input.instagram_url),
            created_at: Set(chrono::Utc::now().into()),
            user_id: Set(user.id.clone()),
            business_id: Set(input.business_id),
        };

        let post = self.post_repo.create(model).await?;
        info!(post_id = %post.id, user_id = %user.id, "Post created");

        Ok(post)
    }
}
