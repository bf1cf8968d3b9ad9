//! Feed-then-comments driver: one unit of work per post, continuing past failures.

mod model;

pub use model::{UnitOutcome, UnitReport};

use std::time::Duration;

use crate::{
    comments::CommentsBuilder,
    core::{CancellationToken, FbClient, FbError, Post, client::RetryConfig, feedback_id_for_post},
    media::MediaChainBuilder,
    paginate::FetchOutcome,
    posts::{FeedSource, PostsBuilder},
};

/// A builder for a batch run over one feed.
pub struct BatchBuilder {
    client: FbClient,
    source: FeedSource,
    posts: usize,
    comments_per_post: usize,
    with_replies: bool,
    walk_albums: bool,
    skip_video: bool,
    unit_delay: Option<Duration>,
    retry_override: Option<RetryConfig>,
    cancel: Option<CancellationToken>,
}

impl BatchBuilder {
    pub fn new(client: &FbClient, source: FeedSource) -> Self {
        Self {
            client: client.clone(),
            source,
            posts: 10,
            comments_per_post: usize::MAX,
            with_replies: true,
            walk_albums: false,
            skip_video: false,
            unit_delay: None,
            retry_override: None,
            cancel: None,
        }
    }

    /// Posts to take from the feed.
    #[must_use]
    pub const fn posts(mut self, n: usize) -> Self {
        self.posts = n;
        self
    }

    #[must_use]
    pub const fn comments_per_post(mut self, n: usize) -> Self {
        self.comments_per_post = n;
        self
    }

    #[must_use]
    pub const fn with_replies(mut self, yes: bool) -> Self {
        self.with_replies = yes;
        self
    }

    /// Fetch the rest of albums larger than the feed inlines.
    #[must_use]
    pub const fn walk_albums(mut self, yes: bool) -> Self {
        self.walk_albums = yes;
        self
    }

    #[must_use]
    pub const fn skip_video(mut self, yes: bool) -> Self {
        self.skip_video = yes;
        self
    }

    /// Overrides the client's delay between units.
    #[must_use]
    pub const fn unit_delay(mut self, delay: Duration) -> Self {
        self.unit_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Fetch the feed, then each post's comments (and album) in turn.
    ///
    /// # Errors
    ///
    /// Only a failed feed fetch is an error; per-post failures are reported in
    /// the returned units.
    #[tracing::instrument(skip(self), err, fields(feed = self.source.id()))]
    pub async fn run(self) -> Result<Vec<UnitReport>, FbError> {
        let mut feed = PostsBuilder::new(&self.client, self.source.clone())
            .target(self.posts)
            .skip_video(self.skip_video)
            .retry_policy(self.retry_override.clone());
        if let Some(token) = &self.cancel {
            feed = feed.cancel_token(token.clone());
        }
        let feed = feed.fetch().await?;

        let delay = self.unit_delay.unwrap_or_else(|| self.client.unit_delay());
        let mut reports = Vec::with_capacity(feed.posts.len());
        for (i, post) in feed.posts.into_iter().enumerate() {
            if self.cancelled() {
                tracing::info!(done = i, "batch cancelled");
                break;
            }
            if i > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let report = self.run_unit(post).await;
            if !report.outcome.is_complete() {
                tracing::warn!(post = %report.post.post_id, outcome = ?report.outcome, "unit not complete");
            }
            reports.push(report);
        }
        Ok(reports)
    }

    async fn run_unit(&self, mut post: Post) -> UnitReport {
        let mut problems = Vec::new();

        if self.walk_albums
            && post.needs_media_walk()
            && let Some(walk) = MediaChainBuilder::for_post(&self.client, &post)
        {
            match self.with_cancel_media(walk).fetch().await {
                Ok(walk) => {
                    if walk.outcome.is_partial() {
                        problems.push(format!("album walk ended early ({:?})", walk.outcome));
                    }
                    if walk.items.len() > post.media.len() {
                        post.media = walk.items;
                    }
                }
                Err(e) => problems.push(format!("album walk failed: {e}")),
            }
        }

        let feedback_id = post
            .feedback_id
            .clone()
            .unwrap_or_else(|| feedback_id_for_post(&post.post_id));
        let mut comments = CommentsBuilder::new(&self.client, feedback_id)
            .target(self.comments_per_post)
            .with_replies(self.with_replies)
            .retry_policy(self.retry_override.clone());
        if let Some(token) = &self.cancel {
            comments = comments.cancel_token(token.clone());
        }

        match comments.fetch().await {
            Ok(thread) => {
                // A post without comments also ends in EndOfData, so only cancellation counts.
                if thread.outcome == FetchOutcome::Cancelled {
                    problems.push("comments cancelled".to_string());
                }
                if thread.failed_reply_fetches > 0 {
                    problems.push(format!("{} reply fetches failed", thread.failed_reply_fetches));
                }
                let outcome = if problems.is_empty() {
                    UnitOutcome::Complete
                } else {
                    UnitOutcome::Partial(problems.join("; "))
                };
                UnitReport {
                    post,
                    comments: thread.comments,
                    outcome,
                }
            }
            Err(e) => UnitReport {
                post,
                comments: Vec::new(),
                outcome: UnitOutcome::Failed(e.to_string()),
            },
        }
    }

    fn with_cancel_media(&self, walk: MediaChainBuilder) -> MediaChainBuilder {
        let walk = walk.retry_policy(self.retry_override.clone());
        match &self.cancel {
            Some(token) => walk.cancel_token(token.clone()),
            None => walk,
        }
    }
}
