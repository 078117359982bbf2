//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, comment};
use bizfeed_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Get every comment on the given posts.
    pub async fn find_by_post_ids(&self, post_ids: &[String]) -> AppResult<Vec<comment::Model>> {
        if post_ids.is_empty() {
            return Ok(vec![]);
        }

        Comment::find()
            .filter(comment::Column::PostId.is_in(post_ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_post_ids_empty_input() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = CommentRepository::new(db);
        assert!(repo.find_by_post_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_post_ids_propagates_db_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([sea_orm::DbErr::Custom("boom".to_string())])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.find_by_post_ids(&["p1".to_string()]).await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
