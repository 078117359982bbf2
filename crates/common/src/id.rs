//! ID generation utilities.

use ulid::Ulid;
use uuid::Uuid;

/// ID generator for entities and tokens.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based row ID.
    ///
    /// ULIDs sort by creation time, so ordering by ID and by `created_at`
    /// agree for rows created by this process.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }

    /// Generate an email verification token.
    ///
    /// Hyphenated random UUID v4; no time component.
    #[must_use]
    pub fn generate_verification_token(&self) -> String {
        Uuid::new_v4().hyphenated().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ulid() {
        let id_gen = IdGenerator::new();
        let id1 = id_gen.generate();
        let id2 = id_gen.generate();

        assert_eq!(id1.len(), 26);
        assert_eq!(id2.len(), 26);
        assert_ne!(id1, id2);
        assert_eq!(id1, id1.to_lowercase());
    }

    #[test]
    fn test_verification_token_is_uuid_v4() {
        let id_gen = IdGenerator::new();
        let token = id_gen.generate_verification_token();

        assert_eq!(token.len(), 36);
        let parsed = Uuid::parse_str(&token).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_verification_tokens_are_unique() {
        let id_gen = IdGenerator::new();
        assert_ne!(
            id_gen.generate_verification_token(),
            id_gen.generate_verification_token()
        );
    }
}
