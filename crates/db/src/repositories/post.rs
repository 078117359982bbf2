//! Post repository.

use std::sync::Arc;

use crate::entities::{Post, post};
use bizfeed_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the most recent posts, newest first.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of posts to return
    /// * `author_ids` - Restrict to these authors. `None` means every author;
    ///   callers decide what an empty set means before getting here.
    pub async fn find_recent(
        &self,
        limit: u64,
        author_ids: Option<&[String]>,
    ) -> AppResult<Vec<post::Model>> {
        let mut condition = Condition::all();

        if let Some(ids) = author_ids {
            condition = condition.add(post::Column::UserId.is_in(ids.to_vec()));
        }

        Post::find()
            .filter(condition)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Set};

    fn create_test_post(id: &str, user_id: &str, minutes_ago: i64) -> post::Model {
        post::Model {
            id: id.to_string(),
            content: Some(format!("post {id}")),
            image_url: None,
            youtube_url: None,
            instagram_url: None,
            created_at: (Utc::now() - Duration::minutes(minutes_ago)).into(),
            user_id: user_id.to_string(),
            business_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let post = create_test_post("p1", "user1", 0);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(Arc::clone(&db));
        let model = post::ActiveModel {
            id: Set(post.id.clone()),
            content: Set(post.content.clone()),
            image_url: Set(None),
            youtube_url: Set(None),
            instagram_url: Set(None),
            created_at: Set(post.created_at),
            user_id: Set(post.user_id.clone()),
            business_id: Set(None),
        };
        assert_eq!(repo.create(model).await.unwrap(), post);

        drop(repo);
        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        assert!(format!("{log:?}").contains(r#"INSERT INTO \"posts\""#));
    }

    #[tokio::test]
    async fn test_create_failure_is_database_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("duplicate key".to_string())])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let model = post::ActiveModel {
            id: Set("p1".to_string()),
            content: Set(Some("hi".to_string())),
            image_url: Set(None),
            youtube_url: Set(None),
            instagram_url: Set(None),
            created_at: Set(Utc::now().into()),
            user_id: Set("user1".to_string()),
            business_id: Set(None),
        };

        assert!(matches!(
            repo.create(model).await,
            Err(AppError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_find_recent_unfiltered() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                create_test_post("p2", "user2", 1),
                create_test_post("p1", "user1", 5),
            ]])
            .into_connection();
        let db = Arc::new(db);

        let repo = PostRepository::new(Arc::clone(&db));
        let result = repo.find_recent(20, None).await.unwrap();
        assert_eq!(result.len(), 2);

        drop(repo);
        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        let sql = format!("{log:?}");
        assert!(sql.contains(r#"ORDER BY \"posts\".\"created_at\" DESC"#));
        assert!(sql.contains("LIMIT"));
        assert!(!sql.contains(" IN ("));
    }

    #[tokio::test]
    async fn test_find_recent_filtered_by_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_post("p2", "user2", 1)]])
            .into_connection();
        let db = Arc::new(db);

        let repo = PostRepository::new(Arc::clone(&db));
        let authors = vec!["user2".to_string(), "user3".to_string()];
        let result = repo.find_recent(20, Some(&authors)).await.unwrap();
        assert_eq!(result.len(), 1);

        drop(repo);
        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        let sql = format!("{log:?}");
        assert!(sql.contains(r#"\"posts\".\"user_id\" IN ("#));
        assert!(sql.contains("user3"));
    }
}
