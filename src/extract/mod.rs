//! Locate entity nodes and pagination cursors in sanitized blocks and project
//! them into normalized records.
//!
//! Nodes are found through the shape tables in `shapes`; a node that matches
//! no known shape, or lacks its identity field, is skipped without failing the
//! rest of the page.

mod cursor;
mod filter;
mod helpers;
mod media;
mod nodes;
mod shapes;

pub use cursor::{Cursor, cursor_from_page_info, find_cursor};
pub use filter::is_video_content;

use serde_json::Value;

use crate::core::{Comment, EntityKind, MediaItem, ParentPostInfo, Post, Record, Reply};
use crate::decode::Block;
use crate::paginate::MediaIndex;
use helpers::{payload_root, str_at};
use shapes::{COMMENT_SHAPES, POST_SHAPES, REPLY_SHAPES, ShapeMatcher, first_match};

/// Caller-controlled filtering applied during extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Drop stories that [`is_video_content`] classifies as video/reel content.
    pub skip_video: bool,
}

/// What one page yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<R> {
    pub records: Vec<R>,
    /// `None` ends pagination.
    pub cursor: Option<Cursor>,
    /// Nodes recognized by a shape, before identity checks and filtering.
    /// Zero means the page carried no entities at all.
    pub nodes_seen: usize,
}

impl<R> Extraction<R> {
    fn map<T>(self, f: impl FnMut(R) -> T) -> Extraction<T> {
        Extraction {
            records: self.records.into_iter().map(f).collect(),
            cursor: self.cursor,
            nodes_seen: self.nodes_seen,
        }
    }
}

/// Extract records of `kind` with media indices scoped to this call.
///
/// Fetch loops use the typed functions with the session's [`MediaIndex`] instead.
#[must_use]
pub fn extract(blocks: &[Block], kind: EntityKind, opts: &ExtractOptions) -> Extraction<Record> {
    let mut media = MediaIndex::default();
    match kind {
        EntityKind::Post => extract_posts(blocks, opts, &mut media).map(Record::Post),
        EntityKind::Comment => extract_comments(blocks).map(Record::Comment),
        EntityKind::Reply => extract_replies(blocks).map(Record::Reply),
        EntityKind::Media => extract_media_step(blocks, None, &mut media).map(Record::Media),
    }
}

/// Walk every block through `table`, projecting matched nodes with `project`.
fn collect<R>(
    blocks: &[Block],
    table: &[ShapeMatcher],
    mut project: impl FnMut(&Value) -> Option<R>,
) -> Extraction<R> {
    let mut records = Vec::new();
    let mut nodes_seen = 0usize;
    let mut colocated = None;

    for block in blocks {
        let Some(m) = first_match(block, table) else {
            continue;
        };
        tracing::trace!(shape = m.shape, nodes = m.nodes.len(), "shape matched");
        nodes_seen += m.nodes.len();
        colocated = colocated.or(m.page_info);
        for node in m.nodes {
            match project(node) {
                Some(r) => records.push(r),
                None => tracing::debug!(shape = m.shape, "node skipped"),
            }
        }
    }

    Extraction {
        records,
        cursor: find_cursor(blocks, colocated),
        nodes_seen,
    }
}

/// Stories from timeline, group, or streamed single-story blocks.
#[must_use]
pub fn extract_posts(
    blocks: &[Block],
    opts: &ExtractOptions,
    media_index: &mut MediaIndex,
) -> Extraction<Post> {
    collect(blocks, POST_SHAPES, |node| {
        if opts.skip_video && is_video_content(node) {
            return None;
        }
        nodes::post(node, media_index)
    })
}

/// Top-level comments; replies are left empty for the fan-out to fill.
#[must_use]
pub fn extract_comments(blocks: &[Block]) -> Extraction<Comment> {
    collect(blocks, COMMENT_SHAPES, nodes::comment)
}

#[must_use]
pub fn extract_replies(blocks: &[Block]) -> Extraction<Reply> {
    collect(blocks, REPLY_SHAPES, nodes::reply)
}

/// One photo-viewer response: the media shown and, as cursor, the next media node id.
///
/// The item's index is counted under `post_id`, else under the post the
/// response names, else under the media id itself.
#[must_use]
pub fn extract_media_step(
    blocks: &[Block],
    post_id: Option<&str>,
    media_index: &mut MediaIndex,
) -> Extraction<MediaItem> {
    let (current, next) = media::viewer_step(blocks);
    let scope = post_id.map(str::to_string).or_else(|| media_scope(blocks));
    let records = current
        .and_then(|m| media::media_item(m, None))
        .map(|mut item| {
            item.index = media_index.next(scope.as_deref().unwrap_or(&item.id));
            item
        })
        .into_iter()
        .collect();
    Extraction {
        records,
        cursor: next,
        nodes_seen: usize::from(current.is_some()),
    }
}

/// Post the viewer is paging through, when the response names it.
fn media_scope(blocks: &[Block]) -> Option<String> {
    blocks.iter().find_map(|b| {
        let root = payload_root(b);
        root.get("currMedia")
            .and_then(|m| str_at(m, &["container_story", "post_id"]))
            .or_else(|| root.get("mediaset").and_then(|s| str_at(s, &["post_id"])))
    })
}

/// Ultimate parent of the first story in the page, following reshares
/// (`attached_story`) to the original, plus that story's first media id.
#[must_use]
pub fn parent_post_info(blocks: &[Block]) -> Option<ParentPostInfo> {
    let first = blocks
        .iter()
        .find_map(|b| first_match(b, POST_SHAPES).and_then(|m| m.nodes.first().copied()))?;

    let mut story = first;
    while let Some(parent) = story
        .get("attached_story")
        .or_else(|| helpers::at(story, &["comet_sections", "content", "story", "attached_story"]))
        .filter(|s| s.is_object())
    {
        story = parent;
    }

    let story_id = str_at(story, &["post_id"]).or_else(|| str_at(story, &["id"]))?;
    let first_media_id = media::attachment_media(story, &story_id, &mut MediaIndex::default())
        .into_iter()
        .next()
        .map(|m| m.id);
    Some(ParentPostInfo {
        story_id,
        first_media_id,
    })
}
