//! Bearer token authentication.
//!
//! Sessions are issued by an external identity provider. The server only
//! checks the HS256 signature and reads the subject, so the authenticated
//! user is a plain value handed to the services that need it.

use bizfeed_common::{AppError, AppResult, config::AuthConfig};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// Profile ID (the token subject).
    pub id: String,
}

impl CurrentUser {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Claims read from an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Verifies access tokens.
#[derive(Clone)]
pub struct AuthService {
    key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match config.audience {
            Some(ref aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Resolve a bearer token to the user it was issued for.
    pub fn authenticate(&self, token: &str) -> AppResult<CurrentUser> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Unauthorized
        })?;

        if data.claims.sub.is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(CurrentUser::new(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config(audience: Option<&str>) -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            audience: audience.map(str::to_string),
        }
    }

    fn token(secret: &str, sub: &str, exp_offset: i64, aud: Option<&str>) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            aud: aud.map(str::to_string),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let service = AuthService::new(&config(None));
        let user = service
            .authenticate(&token("test-secret", "user1", 3600, Some("authenticated")))
            .unwrap();

        assert_eq!(user, CurrentUser::new("user1"));
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let service = AuthService::new(&config(None));
        let result = service.authenticate(&token("other-secret", "user1", 3600, None));

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let service = AuthService::new(&config(None));
        let result = service.authenticate(&token("test-secret", "user1", -3600, None));

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_audience_enforced_when_configured() {
        let service = AuthService::new(&config(Some("authenticated")));

        assert!(
            service
                .authenticate(&token("test-secret", "user1", 3600, Some("authenticated")))
                .is_ok()
        );
        assert!(
            service
                .authenticate(&token("test-secret", "user1", 3600, Some("anon")))
                .is_err()
        );
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        let service = AuthService::new(&config(None));
        assert!(matches!(
            service.authenticate("not-a-jwt"),
            Err(AppError::Unauthorized)
        ));
    }
}
