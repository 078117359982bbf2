//! Post like repository.

use std::sync::Arc;

use crate::entities::{PostLike, post_like};
use bizfeed_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Post like repository for database operations.
#[derive(Clone)]
pub struct PostLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl PostLikeRepository {
    /// Create a new post like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get every like on the given posts.
    pub async fn find_by_post_ids(&self, post_ids: &[String]) -> AppResult<Vec<post_like::Model>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }

        PostLike::find()
            .filter(post_like::Column::PostId.is_in(post_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_post_ids() {
        let like = post_like::Model {
            id: "l1".to_string(),
            post_id: "p1".to_string(),
            user_id: "user2".to_string(),
            created_at: Utc::now().into(),
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .into_connection(),
        );

        let repo = PostLikeRepository::new(db);
        let result = repo.find_by_post_ids(&["p1".to_string()]).await.unwrap();

        assert_eq!(result, vec![like]);
    }
}
