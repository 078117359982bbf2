//! Feed retrieval.

use std::collections::{HashMap, HashSet};

use bizfeed_common::AppResult;
use bizfeed_db::{
    entities::{business, post, profile},
    repositories::{
        BusinessRepository, CommentRepository, FollowRepository, PostLikeRepository,
        PostRepository, ProfileRepository,
    },
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::auth::CurrentUser;

/// Number of posts a feed holds.
pub const FEED_LIMIT: u64 = 20;

/// Timeline mode selected by the reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeedTab {
    /// Everyone's posts.
    #[default]
    ForYou,
    /// Posts by profiles the reader follows.
    Following,
}

impl FeedTab {
    /// Parse a tab name. Anything other than `following` is the "for you" feed.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "following" {
            Self::Following
        } else {
            Self::ForYou
        }
    }

    /// Query-string form, `for-you` or `following`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForYou => "for-you",
            Self::Following => "following",
        }
    }
}

/// A post joined with the rows the feed shows alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPost {
    /// The post row.
    pub post: post::Model,
    /// Author profile, if it still exists.
    pub author: Option<profile::Model>,
    /// Business the post was made for.
    pub business: Option<business::Model>,
    /// Profiles that liked the post.
    pub like_user_ids: Vec<String>,
    /// Comments on the post.
    pub comment_ids: Vec<String>,
}

impl FeedPost {
    #[must_use]
    pub fn likes_count(&self) -> usize {
        self.like_user_ids.len()
    }

    #[must_use]
    pub fn comments_count(&self) -> usize {
        self.comment_ids.len()
    }

    /// Whether `user_id` liked this post.
    #[must_use]
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.like_user_ids.iter().any(|id| id == user_id)
    }
}

/// Feed service for reading timelines.
#[derive(Clone)]
pub struct FeedService {
    post_repo: PostRepository,
    follow_repo: FollowRepository,
    profile_repo: ProfileRepository,
    business_repo: BusinessRepository,
    like_repo: PostLikeRepository,
    comment_repo: CommentRepository,
}

impl FeedService {
    /// Create a new feed service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        follow_repo: FollowRepository,
        profile_repo: ProfileRepository,
        business_repo: BusinessRepository,
        like_repo: PostLikeRepository,
        comment_repo: CommentRepository,
    ) -> Self {
        Self {
            post_repo,
            follow_repo,
            profile_repo,
            business_repo,
            like_repo,
            comment_repo,
        }
    }

    /// Fetch the newest posts for a tab, newest first, at most [`FEED_LIMIT`].
    ///
    /// The following tab narrows the feed to followed authors only when there
    /// is a reader who follows someone. A reader who follows nobody, or no
    /// reader at all, gets the unfiltered feed instead of an empty one.
    pub async fn fetch(
        &self,
        tab: FeedTab,
        user: Option<&CurrentUser>,
    ) -> AppResult<Vec<FeedPost>> {
        let authors = match (tab, user) {
            (FeedTab::Following, Some(user)) => {
                let ids = self.follow_repo.find_following_ids(&user.id).await?;
                if ids.is_empty() {
                    debug!(user_id = %user.id, "Follows nobody, using the global feed");
                    None
                } else {
                    Some(ids)
                }
            }
            _ => None,
        };

        let mut posts = self
            .post_repo
            .find_recent(FEED_LIMIT, authors.as_deref())
            .await?;

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(FEED_LIMIT as usize);

        self.hydrate(posts).await
    }

    /// Attach authors, businesses, likes and comments to posts.
    async fn hydrate(&self, posts: Vec<post::Model>) -> AppResult<Vec<FeedPost>> {
        if posts.is_empty() {
            return Ok(vec![]);
        }

        let post_ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
        let author_ids = unique(posts.iter().map(|p| p.user_id.as_str()));
        let business_ids = unique(posts.iter().filter_map(|p| p.business_id.as_deref()));

        let authors: HashMap<String, profile::Model> = self
            .profile_repo
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let businesses: HashMap<String, business::Model> = self
            .business_repo
            .find_by_ids(&business_ids)
            .await?
            .into_iter()
            .map(|b| (b.id.clone(), b))
            .collect();

        let mut likes: HashMap<String, Vec<String>> = HashMap::new();
        for like in self.like_repo.find_by_post_ids(&post_ids).await? {
            likes.entry(like.post_id).or_default().push(like.user_id);
        }

        let mut comments: HashMap<String, Vec<String>> = HashMap::new();
        for comment in self.comment_repo.find_by_post_ids(&post_ids).await? {
            comments.entry(comment.post_id).or_default().push(comment.id);
        }

        Ok(posts
            .into_iter()
            .map(|post| FeedPost {
                author: authors.get(&post.user_id).cloned(),
                business: post
                    .business_id
                    .as_ref()
                    .and_then(|id| businesses.get(id).cloned()),
                like_user_ids: likes.remove(&post.id).unwrap_or_default(),
                comment_ids: comments.remove(&post.id).unwrap_or_default(),
                post,
            })
            .collect())
    }
}

/// Deduplicate ids, keeping first-seen order.
fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}
