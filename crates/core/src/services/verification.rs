//! Email verification tokens.
//!
//! Issuing stores a fresh token on the profile and hands back the link that
//! redeems it. Nothing is sent; delivering the link is someone else's job.

use bizfeed_common::{AppError, AppResult, IdGenerator};
use bizfeed_db::{entities::profile, repositories::ProfileRepository};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{error, info, warn};

/// Failure while issuing a verification token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The user id or the email was empty.
    #[error("User ID and email are required")]
    MissingField,

    /// Storage failed. The cause is kept for logging, not shown to callers.
    #[error("Failed to send verification")]
    Persistence(String),

    /// Anything else, such as an unreadable request body.
    #[error("{0}")]
    Unexpected(String),
}

impl VerificationError {
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingField)
    }
}

/// A stored verification token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedVerification {
    pub token: String,
    pub sent_at: DateTime<Utc>,
    /// `{origin}/verify-email?token={token}`
    pub link: String,
}

/// Issues and redeems verification tokens.
#[derive(Clone)]
pub struct VerificationService {
    profile_repo: ProfileRepository,
    token_ttl: Duration,
    id_gen: IdGenerator,
}

impl VerificationService {
    #[must_use]
    pub const fn new(profile_repo: ProfileRepository, token_ttl: Duration) -> Self {
        Self {
            profile_repo,
            token_ttl,
            id_gen: IdGenerator::new(),
        }
    }

    /// Store a new token and email on a profile.
    ///
    /// Any outstanding token is replaced and the email goes back to
    /// unverified. Calls are not idempotent; concurrent calls for the same
    /// profile each succeed and the last write is what remains stored.
    pub async fn issue(
        &self,
        user_id: &str,
        email: &str,
        origin: &str,
    ) -> Result<IssuedVerification, VerificationError> {
        if user_id.is_empty() || email.is_empty() {
            return Err(VerificationError::MissingField);
        }

        let token = self.id_gen.generate_verification_token();
        let sent_at = Utc::now();

        let updated = self
            .profile_repo
            .store_verification_token(user_id, email, &token, sent_at)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = %user_id, "Failed to store verification token");
                VerificationError::Persistence(e.to_string())
            })?;

        if updated == 0 {
            warn!(user_id = %user_id, "Verification token issued for unknown profile");
        }

        let link = format!("{}/verify-email?token={token}", origin.trim_end_matches('/'));
        info!(user_id = %user_id, link = %link, "Verification link issued");

        Ok(IssuedVerification {
            token,
            sent_at,
            link,
        })
    }

    /// Mark the email of the profile holding `token` as verified.
    ///
    /// Tokens are single use and expire after the configured TTL.
    pub async fn redeem(&self, token: &str) -> AppResult<profile::Model> {
        if token.is_empty() {
            return Err(AppError::BadRequest("Token is required".to_string()));
        }

        let profile = self
            .profile_repo
            .find_by_verification_token(token)
            .await?
            .ok_or_else(|| AppError::BadRequest("Invalid verification token".to_string()))?;

        let fresh = profile
            .email_verification_sent_at
            .is_some_and(|sent_at| Utc::now() - sent_at.with_timezone(&Utc) <= self.token_ttl);
        if !fresh {
            return Err(AppError::BadRequest(
                "Verification token expired".to_string(),
            ));
        }

        let profile = self.profile_repo.mark_email_verified(profile).await?;
        info!(user_id = %profile.id, "Email verified");

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizfeed_db::test_utils;
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use uuid::Uuid;

    fn exec_ok() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    fn service(db: &Arc<DatabaseConnection>) -> VerificationService {
        VerificationService::new(ProfileRepository::new(Arc::clone(db)), Duration::hours(24))
    }

    fn log_of(db: Arc<DatabaseConnection>) -> String {
        let conn = Arc::try_unwrap(db).ok().unwrap();
        format!("{:?}", conn.into_transaction_log())
    }

    #[tokio::test]
    async fn test_missing_fields_do_not_touch_storage() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = service(&db);

        for (user_id, email) in [("", "a@example.com"), ("user1", ""), ("", "")] {
            let result = service.issue(user_id, email, "https://bizfeed.example").await;
            assert_eq!(result, Err(VerificationError::MissingField));
        }

        drop(service);
        assert_eq!(log_of(db), "[]");
    }

    #[tokio::test]
    async fn test_issue_stores_uuid_token_and_returns_link() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec_ok()])
                .into_connection(),
        );
        let service = service(&db);
        let before = Utc::now();

        let issued = service
            .issue("user1", "ada@example.com", "https://bizfeed.example")
            .await
            .unwrap();

        let parsed = Uuid::parse_str(&issued.token).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert!(issued.sent_at >= before);
        assert_eq!(
            issued.link,
            format!("https://bizfeed.example/verify-email?token={}", issued.token)
        );
        assert!(issued.link.ends_with(&format!("?token={}", issued.token)));

        drop(service);
        let log = log_of(db);
        assert!(log.contains(r#"UPDATE \"profiles\""#));
        assert!(log.contains(&issued.token));
        assert!(log.contains("ada@example.com"));
    }

    #[tokio::test]
    async fn test_issue_for_unknown_profile_still_succeeds() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let result = service(&db)
            .issue("ghost", "ghost@example.com", "https://bizfeed.example")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_storage_failure_is_persistence_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_errors([DbErr::Custom("permission denied".to_string())])
                .into_connection(),
        );

        let err = service(&db)
            .issue("user1", "ada@example.com", "https://bizfeed.example")
            .await
            .unwrap_err();

        assert!(matches!(err, VerificationError::Persistence(_)));
        assert_eq!(err.to_string(), "Failed to send verification");
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_concurrent_issues_last_write_wins() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec_ok(), exec_ok()])
                .into_connection(),
        );
        let service = service(&db);

        // The mock answers without yielding, so writes land in poll order.
        let (first, second) = tokio::join!(
            service.issue("user1", "ada@example.com", "https://bizfeed.example"),
            service.issue("user1", "ada@example.com", "https://bizfeed.example"),
        );
        let first = first.unwrap();
        let second = second.unwrap();
        assert_ne!(first.token, second.token);
        drop(service);

        let conn = Arc::try_unwrap(db).ok().unwrap();
        let writes: Vec<String> = conn
            .into_transaction_log()
            .iter()
            .map(|t| format!("{t:?}"))
            .collect();
        assert_eq!(writes.len(), 2);
        for write in &writes {
            assert!(write.contains(r#"UPDATE \"profiles\""#));
            assert!(write.contains(r#"WHERE \"profiles\".\"id\" = $"#));
            assert!(!write.contains(" AND "));
        }
        assert!(writes[0].contains(&first.token));
        assert!(writes[1].contains(&second.token));
        assert!(!writes[1].contains(&first.token));
    }

    #[tokio::test]
    async fn test_redeem_marks_verified() {
        let mut pending = test_utils::profile("user1");
        pending.email_verification_token = Some("tok".to_string());
        pending.email_verification_sent_at = Some(Utc::now().into());

        let mut verified = test_utils::profile("user1");
        verified.email_verified = true;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_query_results([[verified]])
                .into_connection(),
        );

        let profile = service(&db).redeem("tok").await.unwrap();
        assert!(profile.email_verified);
        assert!(profile.email_verification_token.is_none());
    }

    #[tokio::test]
    async fn test_redeem_unknown_token() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<profile::Model>::new()])
                .into_connection(),
        );

        let result = service(&db).redeem("nope").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_redeem_expired_token() {
        let mut stale = test_utils::profile("user1");
        stale.email_verification_token = Some("tok".to_string());
        stale.email_verification_sent_at = Some((Utc::now() - Duration::hours(25)).into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[stale]])
                .into_connection(),
        );
        let service = service(&db);

        match service.redeem("tok").await {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("expired")),
            other => panic!("Expected expired token error, got {other:?}"),
        }

        drop(service);
        assert!(!log_of(db).contains("UPDATE"));
    }
}
