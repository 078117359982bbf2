//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod feed;
pub mod feed_view;
pub mod post;
pub mod verification;

pub use auth::{AuthService, Claims, CurrentUser};
pub use feed::{FEED_LIMIT, FeedPost, FeedService, FeedTab};
pub use feed_view::{FeedControls, FeedRender, FeedView, PLACEHOLDER_COUNT};
pub use post::{CreatePostInput, PostService};
pub use verification::{IssuedVerification, VerificationError, VerificationService};
