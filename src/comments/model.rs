use serde::Serialize;

use crate::core::Comment;
use crate::paginate::FetchOutcome;

/// Comments collected under one post, with their replies attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentThread {
    pub comments: Vec<Comment>,
    #[serde(skip)]
    pub outcome: FetchOutcome,
    /// Comments whose reply request failed; their `replies` are empty.
    pub failed_reply_fetches: usize,
}

impl CommentThread {
    /// Comments plus replies.
    #[must_use]
    pub fn total(&self) -> usize {
        self.comments.len() + self.comments.iter().map(|c| c.replies.len()).sum::<usize>()
    }
}
