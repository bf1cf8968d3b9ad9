//! Core components of the `fbfeed-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`FbClient`] and its builder.
//! - The primary [`FbError`] type.
//! - The normalized record types shared by every fetcher.
//! - Internal networking, retry and cancellation plumbing.

/// Cooperative cancellation token checked between pages.
pub mod cancel;
/// The main client (`FbClient`), builder, and configuration.
pub mod client;
/// The primary error type (`FbError`) for the crate.
pub mod error;
pub(crate) mod graphql;
/// Normalized records (`Post`, `Comment`, `Reply`, `MediaItem`).
pub mod models;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

#[cfg(feature = "debug-dumps")]
pub(crate) mod debug;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::FbClient`
pub use cancel::CancellationToken;
pub use client::{DocIds, FbClient, FbClientBuilder};
pub use error::FbError;
pub use graphql::feedback_id_for_post;
pub use models::{Comment, EntityKind, MediaItem, MediaKind, ParentPostInfo, Post, Record, Reply};
