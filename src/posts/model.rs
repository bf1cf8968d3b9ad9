use serde::Serialize;

use crate::core::{ParentPostInfo, Post};
use crate::paginate::FetchOutcome;

/// Which feed to page through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// A profile or page timeline, by numeric profile id.
    Timeline(String),
    /// A group discussion feed, by numeric group id.
    Group(String),
}

impl FeedSource {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Timeline(id) | Self::Group(id) => id,
        }
    }

    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::Timeline(_) => "timeline",
            Self::Group(_) => "group",
        }
    }
}

/// Posts collected from one feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostFeed {
    pub posts: Vec<Post>,
    /// Taken from the first page only.
    pub parent: Option<ParentPostInfo>,
    #[serde(skip)]
    pub outcome: FetchOutcome,
    /// Resumes the feed after the last page fetched.
    pub cursor: Option<String>,
}
