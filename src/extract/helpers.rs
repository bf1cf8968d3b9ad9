use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::decode::Block;

/// The object the shapes are matched against: the `data` payload when the block
/// is a whole response document, the block itself when the scanner already
/// cut it down to the payload.
pub(crate) fn payload_root(block: &Block) -> &Block {
    match block.get("data") {
        Some(Value::Object(inner)) => inner,
        _ => block,
    }
}

pub(crate) fn at<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(v, |cur, key| cur.get(*key))
}

/// Ids come back as strings on most documents and as numbers on a few.
pub(crate) fn str_at(v: &Value, path: &[&str]) -> Option<String> {
    match at(v, path)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn u64_at(v: &Value, path: &[&str]) -> Option<u64> {
    match at(v, path)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn u32_at(v: &Value, path: &[&str]) -> Option<u32> {
    u64_at(v, path).and_then(|n| u32::try_from(n).ok())
}

pub(crate) fn timestamp_at(v: &Value, path: &[&str]) -> Option<DateTime<Utc>> {
    at(v, path)
        .and_then(Value::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

pub(crate) fn type_name(v: &Value) -> Option<&str> {
    v.get("__typename").and_then(Value::as_str)
}

/// Keys under which a post embeds another story (a reshare's original).
const NESTED_STORY_KEYS: &[&str] = &["attached_story"];

/// Depth-first search for the first value stored under `key`.
///
/// Does not descend into nested stories, whose counters and timestamps
/// belong to the original rather than the node being projected.
pub(crate) fn find_key<'a>(v: &'a Value, key: &str) -> Option<&'a Value> {
    match v {
        Value::Object(map) => {
            if let Some(found) = map.get(key)
                && !found.is_null()
            {
                return Some(found);
            }
            map.iter()
                .filter(|(k, _)| !NESTED_STORY_KEYS.contains(&k.as_str()))
                .find_map(|(_, child)| find_key(child, key))
        }
        Value::Array(arr) => arr.iter().find_map(|child| find_key(child, key)),
        _ => None,
    }
}

/// `edges[].node` of a connection, skipping edges without an object node.
pub(crate) fn edge_nodes(connection: &Value) -> Option<Vec<&Value>> {
    let edges = connection.get("edges")?.as_array()?;
    Some(
        edges
            .iter()
            .filter_map(|e| e.get("node").filter(|n| n.is_object()))
            .collect(),
    )
}

/// Where a feed story keeps its own UFI summary.
const STORY_REACTION_PATH: &[&str] = &[
    "comet_sections",
    "feedback",
    "story",
    "feedback_context",
    "feedback_target_with_context",
    "comet_ufi_summary_and_actions_renderer",
    "feedback",
    "reaction_count",
    "count",
];

/// Reaction total: the story's own UFI summary first, then wherever else the
/// feed placed it, as `reaction_count.count` (post UFI summary) or
/// `reactors.count` (comment feedback).
pub(crate) fn reaction_count(node: &Value) -> Option<u64> {
    u64_at(node, STORY_REACTION_PATH)
        .or_else(|| find_key(node, "reaction_count").and_then(|rc| u64_at(rc, &["count"])))
        .or_else(|| find_key(node, "reactors").and_then(|r| u64_at(r, &["count"])))
}
