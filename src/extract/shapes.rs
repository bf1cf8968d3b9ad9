//! Known envelope shapes, one table per entity kind.
//!
//! The same logical feed reaches us through different query documents with
//! different nesting. Each matcher recognizes one nesting and returns the
//! candidate nodes it holds; tables are tried in order and the first matcher
//! that recognizes a block wins for that block. New upstream layouts are added
//! here and nowhere else.

use serde_json::Value;

use super::helpers::{at, edge_nodes, payload_root, type_name};
use crate::decode::Block;

/// Candidate nodes recognized in one block.
#[derive(Debug)]
pub(crate) struct ShapeMatch<'a> {
    pub(crate) shape: &'static str,
    pub(crate) nodes: Vec<&'a Value>,
    /// `page_info` sitting next to the edge list, if the shape carries one.
    pub(crate) page_info: Option<&'a Value>,
}

pub(crate) type ShapeMatcher = for<'a> fn(&'a Block) -> Option<ShapeMatch<'a>>;

pub(crate) const POST_SHAPES: &[ShapeMatcher] = &[timeline_feed_units, group_feed, bare_story];
pub(crate) const COMMENT_SHAPES: &[ShapeMatcher] =
    &[comment_rendering_instance, feedback_comments];
pub(crate) const REPLY_SHAPES: &[ShapeMatcher] = &[replies_connection, feedback_replies];

pub(crate) fn first_match<'a>(block: &'a Block, table: &[ShapeMatcher]) -> Option<ShapeMatch<'a>> {
    table.iter().find_map(|matcher| matcher(block))
}

fn connection<'a>(shape: &'static str, conn: &'a Value) -> Option<ShapeMatch<'a>> {
    let nodes = edge_nodes(conn)?;
    Some(ShapeMatch {
        shape,
        nodes,
        page_info: conn.get("page_info").filter(|p| p.is_object()),
    })
}

fn node(block: &Block) -> Option<&Value> {
    payload_root(block).get("node")
}

/* ---------------- posts ---------------- */

/// `node.timeline_list_feed_units.edges[].node` (profile/page timeline)
fn timeline_feed_units(block: &Block) -> Option<ShapeMatch<'_>> {
    connection(
        "timeline_list_feed_units",
        at(node(block)?, &["timeline_list_feed_units"])?,
    )
}

/// `node.group_feed.edges[].node` (first page of a group feed)
fn group_feed(block: &Block) -> Option<ShapeMatch<'_>> {
    connection("group_feed", at(node(block)?, &["group_feed"])?)
}

/// `node` typed `Story` (streamed timeline/group pages)
fn bare_story(block: &Block) -> Option<ShapeMatch<'_>> {
    let n = node(block)?;
    (type_name(n) == Some("Story")).then(|| ShapeMatch {
        shape: "bare_story",
        nodes: vec![n],
        page_info: None,
    })
}

/* ---------------- comments ---------------- */

/// `node.comment_rendering_instance_for_feed_location.comments`
fn comment_rendering_instance(block: &Block) -> Option<ShapeMatch<'_>> {
    connection(
        "comment_rendering_instance",
        at(
            node(block)?,
            &["comment_rendering_instance_for_feed_location", "comments"],
        )?,
    )
}

/// `node.comments`, the connection directly under a feedback node
fn feedback_comments(block: &Block) -> Option<ShapeMatch<'_>> {
    connection("feedback_comments", at(node(block)?, &["comments"])?)
}

/* ---------------- replies ---------------- */

/// `node.replies_connection`
fn replies_connection(block: &Block) -> Option<ShapeMatch<'_>> {
    connection("replies_connection", at(node(block)?, &["replies_connection"])?)
}

/// `node.feedback.replies_connection`, when the comment node itself is returned
fn feedback_replies(block: &Block) -> Option<ShapeMatch<'_>> {
    connection(
        "feedback_replies",
        at(node(block)?, &["feedback", "replies_connection"])?,
    )
}
