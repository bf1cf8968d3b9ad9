use std::collections::HashMap;

use crate::extract::Cursor;

/// Per-post media counter owned by one fetch.
///
/// Hands out 1-based positions so a persistence layer can name files
/// `<post_id>_<index>` without any process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaIndex {
    counters: HashMap<String, u32>,
}

impl MediaIndex {
    /// Next index for `post_id`, starting at 1.
    pub fn next(&mut self, post_id: &str) -> u32 {
        let n = self.counters.entry(post_id.to_string()).or_insert(0);
        *n += 1;
        *n
    }

    /// How many indices were handed out for `post_id`.
    #[must_use]
    pub fn count(&self, post_id: &str) -> u32 {
        self.counters.get(post_id).copied().unwrap_or(0)
    }
}

/// State of one fetch operation.
#[derive(Debug)]
pub struct FetchSession<R> {
    pub(crate) cursor: Option<Cursor>,
    pub(crate) collected: Vec<R>,
    pub(crate) page_index: u32,
    pub(crate) media: MediaIndex,
    target: usize,
}

impl<R> FetchSession<R> {
    pub(crate) fn new(target: usize) -> Self {
        Self {
            cursor: None,
            collected: Vec::new(),
            page_index: 1,
            media: MediaIndex::default(),
            target,
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.target.saturating_sub(self.collected.len())
    }

    pub(crate) fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Append records up to the target; the rest of the page is dropped.
    pub(crate) fn absorb(&mut self, records: Vec<R>) -> usize {
        let take = records.len().min(self.remaining());
        self.collected.extend(records.into_iter().take(take));
        take
    }
}
