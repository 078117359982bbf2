//! Follow repository.

use std::sync::Arc;

use crate::entities::{Follow, follow};
use bizfeed_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Follow repository for database operations.
#[derive(Clone)]
pub struct FollowRepository {
    db: Arc<DatabaseConnection>,
}

impl FollowRepository {
    /// Create a new follow repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get the follow edges going out of a profile.
    pub async fn find_by_follower(&self, follower_id: &str) -> AppResult<Vec<follow::Model>> {
        Follow::find()
            .filter(follow::Column::FollowerId.eq(follower_id))
            .order_by_asc(follow::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the IDs of every profile a profile follows.
    pub async fn find_following_ids(&self, follower_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .find_by_follower(follower_id)
            .await?
            .into_iter()
            .map(|f| f.following_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_follow(id: &str, follower_id: &str, following_id: &str) -> follow::Model {
        follow::Model {
            id: id.to_string(),
            follower_id: follower_id.to_string(),
            following_id: following_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_following_ids() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_follow("f1", "user1", "user2"),
                    create_test_follow("f2", "user1", "user3"),
                ]])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        let ids = repo.find_following_ids("user1").await.unwrap();

        assert_eq!(ids, vec!["user2".to_string(), "user3".to_string()]);
    }

    #[tokio::test]
    async fn test_find_following_ids_empty() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<follow::Model>::new()])
                .into_connection(),
        );

        let repo = FollowRepository::new(db);
        let ids = repo.find_following_ids("loner").await.unwrap();

        assert!(ids.is_empty());
    }
}
