//! Album walk through the photo viewer, one media node per request.
//!
//! Feed responses inline only the first few items of an album; the rest are
//! reached by following each viewer response's next-node id.

mod api;

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;

use crate::{
    core::{
        CancellationToken, FbClient, FbError, MediaItem, ParentPostInfo, Post,
        client::{Backoff, RetryConfig},
    },
    decode::DecodeMode,
    paginate::{FetchOutcome, Paginator},
};

/// Items reached by one album walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaWalk {
    pub post_id: String,
    pub items: Vec<MediaItem>,
    #[serde(skip)]
    pub outcome: FetchOutcome,
}

/// A builder for walking the photo-viewer chain of one post.
pub struct MediaChainBuilder {
    client: FbClient,
    start_node_id: String,
    post_id: String,
    max_items: usize,
    mode: DecodeMode,
    retry_override: Option<RetryConfig>,
    page_delay: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl MediaChainBuilder {
    /// Start at media node `start_node_id` inside the album of `post_id`.
    pub fn new(
        client: &FbClient,
        start_node_id: impl Into<String>,
        post_id: impl Into<String>,
    ) -> Self {
        Self {
            client: client.clone(),
            start_node_id: start_node_id.into(),
            post_id: post_id.into(),
            max_items: usize::MAX,
            mode: DecodeMode::Scan,
            retry_override: None,
            page_delay: None,
            cancel: None,
        }
    }

    /// Walk the album of a feed's parent story; `None` when it has no media.
    pub fn from_parent(client: &FbClient, parent: &ParentPostInfo) -> Option<Self> {
        let start = parent.first_media_id.as_deref()?;
        Some(Self::new(client, start, parent.story_id.as_str()))
    }

    /// Walk the album of `post`, starting from its first inlined item.
    pub fn for_post(client: &FbClient, post: &Post) -> Option<Self> {
        let start = post.media.first()?;
        Some(Self::new(client, start.id.as_str(), post.post_id.as_str()))
    }

    /// Stop after this many items. Unlimited by default; cycles always stop the walk.
    #[must_use]
    pub const fn max_items(mut self, n: usize) -> Self {
        self.max_items = n;
        self
    }

    #[must_use]
    pub const fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Overrides the client's delay between viewer requests.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Follow the chain until it ends, loops, or `max_items` is reached.
    ///
    /// # Errors
    ///
    /// Returns `FbError::InvalidParams` for empty ids and otherwise the first
    /// transport error that survived the retry policy.
    #[tracing::instrument(skip(self), err, fields(post_id = %self.post_id, start = %self.start_node_id))]
    pub async fn fetch(self) -> Result<MediaWalk, FbError> {
        if self.start_node_id.trim().is_empty() || self.post_id.trim().is_empty() {
            return Err(FbError::InvalidParams(
                "media walk needs a start node id and a post id".into(),
            ));
        }
        let delay = self.page_delay.unwrap_or_else(|| self.client.page_delay());
        let paginator = Paginator::new(self.max_items)
            .page_delay(delay)
            .page_backoff(Backoff::Linear { base: delay })
            .cancel_token(self.cancel.clone());
        let mut pages = api::ViewerPages {
            client: &self.client,
            start_node_id: &self.start_node_id,
            post_id: &self.post_id,
            mode: self.mode,
            retry: self.retry_override.as_ref(),
            visited: HashSet::new(),
        };
        let report = paginator.fetch(&mut pages).await?;
        Ok(MediaWalk {
            post_id: self.post_id,
            items: report.records,
            outcome: report.outcome,
        })
    }
}
