//! Comment threads: paged top-level comments, then one reply request per comment.

mod api;
mod model;

pub use model::CommentThread;

use std::time::Duration;

use crate::{
    core::{
        CancellationToken, Comment, FbClient, FbError, Reply,
        client::{Backoff, RetryConfig},
        feedback_id_for_post,
    },
    decode::DecodeMode,
    paginate::{FetchOutcome, Paginator},
};

/// A builder for fetching the comments (and replies) under one post.
pub struct CommentsBuilder {
    client: FbClient,
    feedback_id: String,
    target: usize,
    mode: DecodeMode,
    with_replies: bool,
    retry_override: Option<RetryConfig>,
    page_delay: Option<Duration>,
    page_attempts: u32,
    cancel: Option<CancellationToken>,
}

impl CommentsBuilder {
    /// Comments under a feedback node id.
    pub fn new(client: &FbClient, feedback_id: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            feedback_id: feedback_id.into(),
            target: usize::MAX,
            mode: DecodeMode::SingleObject,
            with_replies: true,
            retry_override: None,
            page_delay: None,
            page_attempts: 3,
            cancel: None,
        }
    }

    /// Comments under a post, deriving its feedback id from the post id.
    pub fn for_post(client: &FbClient, post_id: &str) -> Self {
        Self::new(client, feedback_id_for_post(post_id))
    }

    /// Cap on top-level comments. Unlimited by default.
    #[must_use]
    pub const fn target(mut self, n: usize) -> Self {
        self.target = n;
        self
    }

    /// Comment responses are one JSON document, so `SingleObject` is the default.
    #[must_use]
    pub const fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether to request replies for each comment. On by default.
    #[must_use]
    pub const fn with_replies(mut self, yes: bool) -> Self {
        self.with_replies = yes;
        self
    }

    /// Overrides the client's retry policy for this fetch.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Overrides the client's delay between pages and between reply requests.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

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

    /// Fetch replies for a single comment.
    ///
    /// # Errors
    ///
    /// Returns `FbError::InvalidParams` when the comment has no feedback id or
    /// expansion token, and otherwise any transport or decode error.
    pub async fn fetch_replies(&self, comment: &Comment) -> Result<Vec<Reply>, FbError> {
        let (Some(feedback_id), Some(token)) = (&comment.feedback_id, &comment.expansion_token)
        else {
            return Err(FbError::InvalidParams(format!(
                "comment {} has no reply expansion data",
                comment.comment_id
            )));
        };
        api::fetch_replies(
            &self.client,
            feedback_id,
            token,
            self.mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Page through the comments, then attach replies.
    ///
    /// # Errors
    ///
    /// Returns an error only when a comment page fails; failed reply requests
    /// are counted in `failed_reply_fetches` instead.
    #[tracing::instrument(skip(self), err, fields(feedback_id = %self.feedback_id))]
    pub async fn fetch(self) -> Result<CommentThread, FbError> {
        if self.feedback_id.trim().is_empty() {
            return Err(FbError::InvalidParams("feedback id must not be empty".into()));
        }
        let delay = self.page_delay.unwrap_or_else(|| self.client.page_delay());
        let paginator = Paginator::new(self.target)
            .page_delay(delay)
            .page_attempts(self.page_attempts)
            .page_backoff(Backoff::Linear { base: delay })
            .cancel_token(self.cancel.clone());
        let mut pages = api::CommentPages {
            client: &self.client,
            feedback_id: &self.feedback_id,
            mode: self.mode,
            retry: self.retry_override.as_ref(),
        };
        let report = paginator.fetch(&mut pages).await?;

        let mut thread = CommentThread {
            comments: report.records,
            outcome: report.outcome,
            failed_reply_fetches: 0,
        };
        if self.with_replies {
            self.attach_replies(&mut thread, delay).await;
        }
        Ok(thread)
    }

    async fn attach_replies(&self, thread: &mut CommentThread, delay: Duration) {
        let mut requested = false;
        for comment in &mut thread.comments {
            if comment.expansion_token.is_none() || comment.feedback_id.is_none() {
                continue;
            }
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                thread.outcome = FetchOutcome::Cancelled;
                return;
            }
            if requested && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            requested = true;

            match self.fetch_replies(comment).await {
                Ok(replies) => {
                    tracing::debug!(comment = %comment.comment_id, replies = replies.len(), "replies attached");
                    comment.replies = replies;
                }
                Err(e) => {
                    tracing::warn!(comment = %comment.comment_id, error = %e, "reply fetch failed");
                    thread.failed_reply_fetches += 1;
                }
            }
        }
    }
}
