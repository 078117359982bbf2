//! Feed view state.
//!
//! Holds what a reader currently sees: the active tab, the posts of the last
//! refresh and whether a refresh is in flight. Refresh failures never escape;
//! they are logged and the view shows an empty feed.

use tracing::{debug, error};

use crate::services::auth::CurrentUser;
use crate::services::feed::{FeedPost, FeedService, FeedTab};

/// Number of skeleton cards shown while loading.
pub const PLACEHOLDER_COUNT: usize = 3;

const FOR_YOU_EMPTY: &str = "No posts yet. Be the first to share!";
const FOLLOWING_EMPTY: &str = "Follow entrepreneurs to see their posts here!";

/// What the view shows.
#[derive(Debug, PartialEq, Eq)]
pub enum FeedRender<'a> {
    /// Skeleton cards while the first load is in flight.
    Loading { placeholders: usize },
    /// Posts, newest first.
    Posts(&'a [FeedPost]),
    /// Nothing to show on the current tab.
    Empty { message: &'static str },
}

/// Which affordances are available to the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedControls {
    /// Only signed-in readers can post.
    pub can_create_post: bool,
    /// The following tab is shown either way, this only toggles it.
    pub following_tab_enabled: bool,
}

/// A reader's feed.
pub struct FeedView {
    service: FeedService,
    posts: Vec<FeedPost>,
    loading: bool,
    tab: FeedTab,
    user: Option<CurrentUser>,
    auth_ready: bool,
    completed_refreshes: u64,
}

impl FeedView {
    /// Create a view on the "for you" tab that waits for auth before loading.
    #[must_use]
    pub const fn new(service: FeedService) -> Self {
        Self {
            service,
            posts: Vec::new(),
            loading: true,
            tab: FeedTab::ForYou,
            user: None,
            auth_ready: false,
            completed_refreshes: 0,
        }
    }

    #[must_use]
    pub const fn tab(&self) -> FeedTab {
        self.tab
    }

    #[must_use]
    pub const fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn posts(&self) -> &[FeedPost] {
        &self.posts
    }

    /// Number of refreshes that ran to completion, successful or not.
    #[cfg(test)]
    pub(crate) const fn completed_refreshes(&self) -> u64 {
        self.completed_refreshes
    }

    /// Auth finished initializing; loads the feed for the first time.
    pub async fn auth_initialized(&mut self, user: Option<CurrentUser>) {
        self.user = user;
        self.auth_ready = true;
        self.refresh().await;
    }

    /// Switch tabs. Reloads only when the tab actually changes.
    pub async fn set_tab(&mut self, tab: FeedTab) {
        if self.tab == tab {
            return;
        }
        self.tab = tab;
        self.refresh_if_ready().await;
    }

    /// Sign in, sign out or switch accounts.
    pub async fn set_user(&mut self, user: Option<CurrentUser>) {
        if self.user == user {
            return;
        }
        self.user = user;
        self.refresh_if_ready().await;
    }

    /// The reader published a post.
    pub async fn post_created(&mut self) {
        self.refresh_if_ready().await;
    }

    async fn refresh_if_ready(&mut self) {
        if self.auth_ready {
            self.refresh().await;
        } else {
            debug!(tab = self.tab.as_str(), "Auth not initialized, refresh deferred");
        }
    }

    /// Reload the feed for the current tab and user.
    pub async fn refresh(&mut self) {
        self.loading = true;

        match self.service.fetch(self.tab, self.user.as_ref()).await {
            Ok(posts) => self.posts = posts,
            Err(e) => {
                error!(error = %e, tab = self.tab.as_str(), "Failed to fetch feed");
                self.posts.clear();
            }
        }

        self.loading = false;
        self.completed_refreshes += 1;
        debug!(
            tab = self.tab.as_str(),
            posts = self.posts.len(),
            refreshes = self.completed_refreshes,
            "Feed refreshed"
        );
    }

    #[must_use]
    pub fn render(&self) -> FeedRender<'_> {
        if self.loading {
            FeedRender::Loading {
                placeholders: PLACEHOLDER_COUNT,
            }
        } else if self.posts.is_empty() {
            FeedRender::Empty {
                message: match self.tab {
                    FeedTab::ForYou => FOR_YOU_EMPTY,
                    FeedTab::Following => FOLLOWING_EMPTY,
                },
            }
        } else {
            FeedRender::Posts(&self.posts)
        }
    }

    #[must_use]
    pub const fn controls(&self) -> FeedControls {
        let signed_in = self.user.is_some();
        FeedControls {
            can_create_post: signed_in,
            following_tab_enabled: signed_in,
        }
    }
}
