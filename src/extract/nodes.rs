use serde_json::Value;

use super::filter::is_video_content;
use super::helpers::{find_key, reaction_count, str_at, timestamp_at, type_name};
use super::media::{album_total, attachment_media};
use crate::core::{Comment, Post, Reply};
use crate::paginate::MediaIndex;

/// Project a story node. `None` when it is not a story or has no `post_id`.
pub(crate) fn post(node: &Value, media: &mut MediaIndex) -> Option<Post> {
    if type_name(node) != Some("Story") {
        return None;
    }
    let post_id = str_at(node, &["post_id"])?;

    let text = str_at(node, &["comet_sections", "content", "story", "message", "text"])
        .or_else(|| str_at(node, &["message", "text"]));
    let permalink = str_at(node, &["permalink_url"]).or_else(|| {
        node.get("attachments")
            .and_then(|a| a.get(0))
            .and_then(|a| str_at(a, &["styles", "attachment", "url"]))
    });
    let created_at = timestamp_at(node, &["creation_time"])
        .or_else(|| timestamp_at(node, &["comet_sections", "timestamp", "story", "creation_time"]))
        .or_else(|| {
            find_key(node, "creation_time")
                .and_then(Value::as_i64)
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        });

    Some(Post {
        id: str_at(node, &["id"]),
        feedback_id: str_at(node, &["feedback", "id"]),
        text,
        permalink,
        created_at,
        reaction_count: reaction_count(node),
        media: attachment_media(node, &post_id, media),
        media_total: album_total(node),
        is_video: is_video_content(node),
        post_id,
    })
}

/// Project a comment node. `None` without `legacy_fbid` or `id`.
pub(crate) fn comment(node: &Value) -> Option<Comment> {
    let comment_id = str_at(node, &["legacy_fbid"]).or_else(|| str_at(node, &["id"]))?;
    Some(Comment {
        comment_id,
        author: str_at(node, &["author", "name"]),
        author_id: str_at(node, &["author", "id"]),
        text: str_at(node, &["body", "text"]),
        created_at: timestamp_at(node, &["created_time"]),
        reaction_count: reaction_count(node),
        feedback_id: str_at(node, &["feedback", "id"]),
        expansion_token: str_at(node, &["feedback", "expansion_info", "expansion_token"]),
        replies: Vec::new(),
    })
}

/// Project a reply node. `None` without `legacy_fbid` or `id`.
pub(crate) fn reply(node: &Value) -> Option<Reply> {
    let reply_id = str_at(node, &["legacy_fbid"]).or_else(|| str_at(node, &["id"]))?;
    Some(Reply {
        reply_id,
        author: str_at(node, &["author", "name"]),
        author_id: str_at(node, &["author", "id"]),
        text: str_at(node, &["body", "text"]),
        created_at: timestamp_at(node, &["created_time"]),
        reaction_count: reaction_count(node),
    })
}
