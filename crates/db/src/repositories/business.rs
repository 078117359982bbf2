//! Business repository.

use std::sync::Arc;

use crate::entities::{Business, business};
use bizfeed_common::{AppError, AppResult};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Business repository for database operations.
#[derive(Clone)]
pub struct BusinessRepository {
    db: Arc<DatabaseConnection>,
}

impl BusinessRepository {
    /// Create a new business repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a business by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<business::Model>> {
        Business::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a business by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<business::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BusinessNotFound(id.to_string()))
    }

    /// Find businesses by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<business::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Business::find()
            .filter(business::Column::Id.is_in(ids.to_vec()))
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
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<business::Model>::new()])
                .into_connection(),
        );

        let repo = BusinessRepository::new(db);
        match repo.get_by_id("b404").await {
            Err(AppError::BusinessNotFound(id)) => assert_eq!(id, "b404"),
            _ => panic!("Expected BusinessNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_ids() {
        let acme = business::Model {
            id: "b1".to_string(),
            owner_id: "user1".to_string(),
            name: "Acme".to_string(),
            logo_url: None,
            created_at: Utc::now().into(),
        };
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[acme.clone()]])
                .into_connection(),
        );

        let repo = BusinessRepository::new(db);
        let result = repo.find_by_ids(&["b1".to_string()]).await.unwrap();

        assert_eq!(result, vec![acme]);
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        // No results appended: a query would fail.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = BusinessRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }
}
