use serde::Serialize;

use crate::core::{Comment, Post};

/// How one post's unit of work ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum UnitOutcome {
    Complete,
    /// Some data was collected but a step stopped early or failed.
    Partial(String),
    /// The comment fetch failed outright.
    Failed(String),
}

impl UnitOutcome {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// A post with everything fetched for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    /// The post; its `media` holds the full album when a walk ran.
    pub post: Post,
    pub comments: Vec<Comment>,
    pub outcome: UnitOutcome,
}
