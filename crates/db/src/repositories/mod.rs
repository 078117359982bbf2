//! Database repositories.

pub mod business;
pub mod comment;
pub mod follow;
pub mod post;
pub mod post_like;
pub mod profile;

pub use business::BusinessRepository;
pub use comment::CommentRepository;
pub use follow::FollowRepository;
pub use post::PostRepository;
pub use post_like::PostLikeRepository;
pub use profile::ProfileRepository;
