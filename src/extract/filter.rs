use serde_json::Value;

use super::helpers::{str_at, type_name};

const VIDEO_MARKERS: [&str; 2] = ["video", "reel"];
const VIDEO_PATHS: [&str; 3] = ["/reel/", "/reels/", "/videos/"];

/// Heuristic: does this story carry video or short-form (reel) content?
///
/// Looks at the story's own type name, every `__typename` inside its
/// attachments, `is_playable` media flags and the permalink path. This is
/// string matching over a schema we do not control: renamed types slip
/// through (false negatives), and a photo album with one clip in it is
/// classified as video as a whole (false positive).
#[must_use]
pub fn is_video_content(node: &Value) -> bool {
    if type_name(node).is_some_and(has_video_marker) {
        return true;
    }
    if let Some(link) = str_at(node, &["permalink_url"])
        && VIDEO_PATHS.iter().any(|p| link.contains(p))
    {
        return true;
    }
    node.get("attachments")
        .is_some_and(subtree_mentions_video)
}

fn has_video_marker(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    VIDEO_MARKERS.iter().any(|m| lower.contains(m))
}

fn subtree_mentions_video(v: &Value) -> bool {
    match v {
        Value::Object(map) => map.iter().any(|(key, child)| match (key.as_str(), child) {
            ("__typename", Value::String(name)) => has_video_marker(name),
            ("is_playable", Value::Bool(playable)) => *playable,
            _ => subtree_mentions_video(child),
        }),
        Value::Array(arr) => arr.iter().any(subtree_mentions_video),
        _ => false,
    }
}
