//! Cursor-driven fetch loop shared by every feed kind.
//!
//! A [`PageSource`] knows how to request and extract one page for a cursor;
//! the [`Paginator`] threads cursors between pages, accumulates records up to
//! a target, re-requests pages that decoded to nothing, paces requests and
//! stops early on cancellation.

mod session;

pub use session::MediaIndex;
pub(crate) use session::FetchSession;

use std::time::Duration;

use crate::core::{CancellationToken, FbError, client::Backoff};
use crate::extract::{Cursor, Extraction};

/// One page as seen by the fetch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<R> {
    pub records: Vec<R>,
    pub cursor: Option<Cursor>,
    /// Entity nodes recognized on the page before filtering.
    pub nodes_seen: usize,
    /// Blocks the decoder recovered; zero means the body held no data at all.
    pub blocks: usize,
}

impl<R> Page<R> {
    #[must_use]
    pub fn from_extraction(extraction: Extraction<R>, blocks: usize) -> Self {
        Self {
            records: extraction.records,
            cursor: extraction.cursor,
            nodes_seen: extraction.nodes_seen,
            blocks,
        }
    }
}

/// Requests and extracts one page.
///
/// Fetches run strictly one request at a time, so the futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Record;

    /// Fetch the page after `cursor` (`None` for the first page).
    /// `page_index` starts at 1; `media` is the session's media counter.
    async fn fetch_page(
        &mut self,
        cursor: Option<&str>,
        page_index: u32,
        media: &mut MediaIndex,
    ) -> Result<Page<Self::Record>, FbError>;
}

/// Why a fetch stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The target count was reached.
    Complete,
    /// The upstream reported no further page.
    Exhausted,
    /// A page held no entities, or kept decoding to nothing after page retries.
    EndOfData,
    /// The cancellation token was set between pages.
    Cancelled,
}

impl FetchOutcome {
    /// Whether fewer records than requested may have been returned for a reason
    /// other than the feed genuinely ending.
    #[must_use]
    pub const fn is_partial(self) -> bool {
        matches!(self, Self::EndOfData | Self::Cancelled)
    }
}

/// Records accumulated by one fetch and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport<R> {
    pub records: Vec<R>,
    pub outcome: FetchOutcome,
    /// Pages requested, not counting page-level retries.
    pub pages: u32,
    /// Where a later fetch can resume; `None` once the feed is exhausted.
    pub cursor: Option<Cursor>,
    /// Media indices handed out during the fetch.
    pub media: MediaIndex,
}

/// Drives a [`PageSource`] until the target, the end of the feed, or cancellation.
#[derive(Debug, Clone)]
pub struct Paginator {
    target: usize,
    page_delay: Duration,
    page_attempts: u32,
    page_backoff: Backoff,
    cancel: Option<CancellationToken>,
}

impl Paginator {
    /// A paginator collecting up to `target` records, pacing pages 1s apart and
    /// re-requesting a page that decodes to nothing up to 3 times in total.
    #[must_use]
    pub fn new(target: usize) -> Self {
        Self {
            target,
            page_delay: Duration::from_secs(1),
            page_attempts: 3,
            page_backoff: Backoff::Linear {
                base: Duration::from_secs(1),
            },
            cancel: None,
        }
    }

    /// Delay between consecutive pages. `Duration::ZERO` disables pacing.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Total attempts for a page that decodes to zero blocks (minimum 1).
    #[must_use]
    pub const fn page_attempts(mut self, attempts: u32) -> Self {
        self.page_attempts = attempts;
        self
    }

    /// Backoff between page-level attempts.
    #[must_use]
    pub fn page_backoff(mut self, backoff: Backoff) -> Self {
        self.page_backoff = backoff;
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: Option<CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Run the loop.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by the source (typically
    /// `FbError::RetryExhausted`); records collected so far are discarded.
    pub async fn fetch<S: PageSource>(
        &self,
        source: &mut S,
    ) -> Result<FetchReport<S::Record>, FbError> {
        let mut session = FetchSession::new(self.target);
        let mut pages = 0u32;

        let outcome = loop {
            if session.is_full() {
                break FetchOutcome::Complete;
            }
            if self.cancelled() {
                break FetchOutcome::Cancelled;
            }

            let page = self.fetch_one(source, &mut session).await?;
            pages += 1;
            let taken = session.absorb(page.records);
            tracing::debug!(
                page = session.page_index,
                blocks = page.blocks,
                nodes = page.nodes_seen,
                taken,
                collected = session.collected.len(),
                has_cursor = page.cursor.is_some(),
                "page done"
            );

            // An empty body keeps the cursor that produced it so the fetch can be resumed.
            if page.blocks > 0 {
                session.cursor = page.cursor;
            }
            if session.is_full() {
                break FetchOutcome::Complete;
            }
            if page.blocks == 0 || page.nodes_seen == 0 {
                break FetchOutcome::EndOfData;
            }
            if session.cursor.is_none() {
                break FetchOutcome::Exhausted;
            }
            session.page_index += 1;

            if !self.page_delay.is_zero() && !self.cancelled() {
                tokio::time::sleep(self.page_delay).await;
            }
        };

        tracing::info!(
            ?outcome,
            records = session.collected.len(),
            pages,
            "fetch finished"
        );
        Ok(FetchReport {
            records: session.collected,
            outcome,
            pages,
            cursor: session.cursor,
            media: session.media,
        })
    }

    /// One page, re-requested while it decodes to zero blocks.
    async fn fetch_one<S: PageSource>(
        &self,
        source: &mut S,
        session: &mut FetchSession<S::Record>,
    ) -> Result<Page<S::Record>, FbError> {
        let attempts = self.page_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            let page = source
                .fetch_page(session.cursor.as_deref(), session.page_index, &mut session.media)
                .await?;
            if page.blocks > 0 || attempt >= attempts {
                return Ok(page);
            }
            let wait = self.page_backoff.delay(attempt);
            tracing::warn!(
                page = session.page_index,
                attempt,
                ?wait,
                "page decoded to nothing; requesting it again"
            );
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
            attempt += 1;
        }
    }
}
