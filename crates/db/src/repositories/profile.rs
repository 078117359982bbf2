//! Profile repository.

use std::sync::Arc;

use crate::entities::{Profile, profile};
use bizfeed_common::{AppError, AppResult};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    UpdateResult, sea_query::Expr,
};

/// Profile repository for database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepository {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find profiles by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<profile::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Profile::find()
            .filter(profile::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the profile holding an outstanding verification token.
    pub async fn find_by_verification_token(
        &self,
        token: &str,
    ) -> AppResult<Option<profile::Model>> {
        Profile::find()
            .filter(profile::Column::EmailVerificationToken.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Overwrite the email and verification fields of a profile.
    ///
    /// Unconditional single-statement update: concurrent calls for the same
    /// profile are not coordinated and the last write wins. Returns the number
    /// of rows touched, which is zero for an unknown profile.
    pub async fn store_verification_token(
        &self,
        id: &str,
        email: &str,
        token: &str,
        sent_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result: UpdateResult = Profile::update_many()
            .col_expr(profile::Column::Email, Expr::value(email))
            .col_expr(profile::Column::EmailVerified, Expr::value(false))
            .col_expr(profile::Column::EmailVerificationToken, Expr::value(token))
            .col_expr(
                profile::Column::EmailVerificationSentAt,
                Expr::value(sent_at.fixed_offset()),
            )
            .filter(profile::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    /// Mark a profile's email as verified and consume its token.
    pub async fn mark_email_verified(&self, model: profile::Model) -> AppResult<profile::Model> {
        let mut active: profile::ActiveModel = model.into();
        active.email_verified = Set(true);
        active.email_verification_token = Set(None);
        active.email_verification_sent_at = Set(None);
        active
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_profile(id: &str) -> profile::Model {
        profile::Model {
            id: id.to_string(),
            full_name: Some("Ada Founder".to_string()),
            username: Some(id.to_string()),
            avatar_url: None,
            email: Some(format!("{id}@example.com")),
            email_verified: false,
            email_verification_token: None,
            email_verification_sent_at: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_ids() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_profile("user1"),
                    create_test_profile("user2"),
                ]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo
            .find_by_ids(&["user1".to_string(), "user2".to_string()])
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_store_verification_token_writes_all_fields() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = ProfileRepository::new(Arc::clone(&db));
        let rows = repo
            .store_verification_token("user1", "new@example.com", "tok-123", Utc::now())
            .await
            .unwrap();
        assert_eq!(rows, 1);

        drop(repo);
        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        let sql = format!("{log:?}");
        assert!(sql.contains("UPDATE"));
        assert!(sql.contains("email_verification_token"));
        assert!(sql.contains("email_verification_sent_at"));
        assert!(sql.contains("new@example.com"));
        assert!(sql.contains("tok-123"));
    }

    #[tokio::test]
    async fn test_store_verification_token_unknown_profile_touches_nothing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let rows = repo
            .store_verification_token("ghost", "a@example.com", "tok", Utc::now())
            .await
            .unwrap();

        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_mark_email_verified_clears_token() {
        let mut pending = create_test_profile("user1");
        pending.email_verification_token = Some("tok".to_string());
        pending.email_verification_sent_at = Some(Utc::now().into());

        let mut verified = pending.clone();
        verified.email_verified = true;
        verified.email_verification_token = None;
        verified.email_verification_sent_at = None;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[verified.clone()]])
                .into_connection(),
        );

        let repo = ProfileRepository::new(db);
        let result = repo.mark_email_verified(pending).await.unwrap();

        assert!(result.email_verified);
        assert!(result.email_verification_token.is_none());
        assert!(result.email_verification_sent_at.is_none());
    }
}
