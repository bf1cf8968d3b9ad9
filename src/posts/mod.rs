//! Timeline and group feeds.
//!
//! - `api`: request variables and the page source driven by the paginator.
//! - `model`: the feed selector and the collected result.

mod api;
mod model;

pub use model::{FeedSource, PostFeed};

use std::time::Duration;

use crate::{
    core::{
        CancellationToken, FbClient, FbError,
        client::{Backoff, RetryConfig},
    },
    decode::DecodeMode,
    extract::ExtractOptions,
    paginate::Paginator,
};

/// A builder for paging through the posts of one timeline or group.
pub struct PostsBuilder {
    client: FbClient,
    source: FeedSource,
    target: usize,
    per_page: u32,
    mode: DecodeMode,
    opts: ExtractOptions,
    retry_override: Option<RetryConfig>,
    page_delay: Option<Duration>,
    page_attempts: u32,
    cancel: Option<CancellationToken>,
}

impl PostsBuilder {
    /// Collect up to 10 posts from `source`, 3 per page.
    pub fn new(client: &FbClient, source: FeedSource) -> Self {
        Self {
            client: client.clone(),
            source,
            target: 10,
            per_page: 3,
            mode: DecodeMode::Scan,
            opts: ExtractOptions::default(),
            retry_override: None,
            page_delay: None,
            page_attempts: 3,
            cancel: None,
        }
    }

    /// Shorthand for a profile or page timeline.
    pub fn timeline(client: &FbClient, profile_id: impl Into<String>) -> Self {
        Self::new(client, FeedSource::Timeline(profile_id.into()))
    }

    /// Shorthand for a group discussion feed.
    pub fn group(client: &FbClient, group_id: impl Into<String>) -> Self {
        Self::new(client, FeedSource::Group(group_id.into()))
    }

    /// Number of posts to collect. Pages are requested until reached or the feed ends.
    #[must_use]
    pub const fn target(mut self, n: usize) -> Self {
        self.target = n;
        self
    }

    /// Stories requested per page (the `count` variable).
    #[must_use]
    pub const fn per_page(mut self, n: u32) -> Self {
        self.per_page = n;
        self
    }

    /// How response bodies are split into blocks. Feeds stream, so `Scan` is the default.
    #[must_use]
    pub const fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Drop stories classified as video or reel content.
    #[must_use]
    pub const fn skip_video(mut self, yes: bool) -> Self {
        self.opts.skip_video = yes;
        self
    }

    /// Overrides the client's retry policy for this fetch.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Overrides the client's delay between pages.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    /// Total attempts for a page whose body decodes to nothing.
    #[must_use]
    pub const fn page_attempts(mut self, attempts: u32) -> Self {
        self.page_attempts = attempts;
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Page through the feed.
    ///
    /// # Errors
    ///
    /// Returns `FbError::InvalidParams` for an empty feed id and otherwise the
    /// first transport error that survived the retry policy.
    #[tracing::instrument(skip(self), err, fields(feed = self.source.label(), id = self.source.id()))]
    pub async fn fetch(self) -> Result<PostFeed, FbError> {
        if self.source.id().trim().is_empty() {
            return Err(FbError::InvalidParams("feed id must not be empty".into()));
        }
        if self.per_page == 0 {
            return Err(FbError::InvalidParams("per_page must be at least 1".into()));
        }

        let delay = self.page_delay.unwrap_or_else(|| self.client.page_delay());
        let paginator = Paginator::new(self.target)
            .page_delay(delay)
            .page_attempts(self.page_attempts)
            .page_backoff(Backoff::Linear { base: delay })
            .cancel_token(self.cancel.clone());
        let mut pages = api::FeedPages {
            client: &self.client,
            source: &self.source,
            per_page: self.per_page,
            mode: self.mode,
            opts: self.opts,
            retry: self.retry_override.as_ref(),
            parent: None,
        };

        let report = paginator.fetch(&mut pages).await?;
        Ok(PostFeed {
            posts: report.records,
            parent: pages.parent,
            outcome: report.outcome,
            cursor: report.cursor,
        })
    }
}
