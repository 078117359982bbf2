//! Test utilities for database operations.
//!
//! Model builders shared by the repository, service and API tests. Pair them
//! with `sea_orm::MockDatabase` (the `test-utils` feature enables it)
//! or insert them into a real database.

use chrono::{Duration, Utc};

use crate::entities::{business, comment, follow, post, post_like, profile};

/// Build a profile with an unverified email.
#[must_use]
pub fn profile(id: &str) -> profile::Model {
    profile::Model {
        id: id.to_string(),
        full_name: Some(format!("{id} name")),
        username: Some(id.to_string()),
        avatar_url: None,
        email: Some(format!("{id}@example.com")),
        email_verified: false,
        email_verification_token: None,
        email_verification_sent_at: None,
        created_at: Utc::now().into(),
    }
}

/// Build a business owned by `owner_id`.
#[must_use]
pub fn business(id: &str, owner_id: &str) -> business::Model {
    business::Model {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        name: format!("{id} inc"),
        logo_url: None,
        created_at: Utc::now().into(),
    }
}

/// Build a text post created `minutes_ago` minutes before now.
#[must_use]
pub fn post(id: &str, user_id: &str, minutes_ago: i64) -> post::Model {
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

/// Build a follow edge.
#[must_use]
pub fn follow(follower_id: &str, following_id: &str) -> follow::Model {
    follow::Model {
        id: format!("{follower_id}->{following_id}"),
        follower_id: follower_id.to_string(),
        following_id: following_id.to_string(),
        created_at: Utc::now().into(),
    }
}

/// Build a like on `post_id` by `user_id`.
#[must_use]
pub fn like(post_id: &str, user_id: &str) -> post_like::Model {
    post_like::Model {
        id: format!("like-{post_id}-{user_id}"),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        created_at: Utc::now().into(),
    }
}

/// Build a comment on `post_id`.
#[must_use]
pub fn comment(id: &str, post_id: &str, user_id: &str) -> comment::Model {
    comment::Model {
        id: id.to_string(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        content: "nice".to_string(),
        created_at: Utc::now().into(),
    }
}
