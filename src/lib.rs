//! fbfeed-rs: async client for the Facebook web GraphQL endpoint.
//!
//! Pages through profile timelines and group feeds, comment threads with their
//! replies, and photo-viewer album chains, recovering JSON from the endpoint's
//! wrapped wire format and normalizing each entity into one flat record.
//!
//! ```no_run
//! use fbfeed_rs::{FbClient, PostsBuilder};
//!
//! # async fn run() -> Result<(), fbfeed_rs::FbError> {
//! let client = FbClient::default();
//! let feed = PostsBuilder::timeline(&client, "100064860875397")
//!     .target(6)
//!     .fetch()
//!     .await?;
//! for post in &feed.posts {
//!     println!("{} {:?}", post.post_id, post.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod comments;
pub mod core;
pub mod decode;
pub mod extract;
pub mod media;
pub mod paginate;
pub mod posts;

pub use batch::{BatchBuilder, UnitOutcome, UnitReport};
pub use comments::{CommentThread, CommentsBuilder};
pub use crate::core::client::{Backoff, RetryConfig};
pub use crate::core::{
    CancellationToken, Comment, DocIds, EntityKind, FbClient, FbClientBuilder, FbError, MediaItem,
    MediaKind, ParentPostInfo, Post, Record, Reply, feedback_id_for_post,
};
pub use decode::{Block, DecodeMode};
pub use extract::{ExtractOptions, Extraction};
pub use media::{MediaChainBuilder, MediaWalk};
pub use paginate::{FetchOutcome, FetchReport, MediaIndex, Page, PageSource, Paginator};
pub use posts::{FeedSource, PostFeed, PostsBuilder};

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// # Errors
///
/// Fails if a global subscriber is already set.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}
