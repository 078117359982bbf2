//! Database entities.

#![allow(missing_docs)]

pub mod business;
pub mod comment;
pub mod follow;
pub mod post;
pub mod post_like;
pub mod profile;

pub use business::Entity as Business;
pub use comment::Entity as Comment;
pub use follow::Entity as Follow;
pub use post::Entity as Post;
pub use post_like::Entity as PostLike;
pub use profile::Entity as Profile;
