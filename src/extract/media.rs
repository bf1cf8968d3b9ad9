use std::collections::HashSet;

use serde_json::Value;

use super::helpers::{at, payload_root, str_at, type_name, u32_at};
use crate::core::{MediaItem, MediaKind};
use crate::decode::Block;
use crate::paginate::MediaIndex;

/// Media of one story, in attachment order, without duplicates.
///
/// Per attachment the single attached media comes first, then the album
/// (`all_subattachments`) items, then a bare video `media` the group feed uses.
pub(crate) fn attachment_media(story: &Value, post_id: &str, index: &mut MediaIndex) -> Vec<MediaItem> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let Some(attachments) = story.get("attachments").and_then(Value::as_array) else {
        return out;
    };

    for att in attachments {
        let mut push = |m: Option<MediaItem>, out: &mut Vec<MediaItem>| {
            if let Some(mut item) = m
                && seen.insert(item.id.clone())
            {
                item.index = index.next(post_id);
                out.push(item);
            }
        };

        // Single photo/video: data under styles.attachment.media, id possibly
        // only on the attachment's own media.
        if let Some(single) = at(att, &["styles", "attachment", "media"]) {
            let fallback_id = str_at(att, &["media", "id"]);
            push(media_item(single, fallback_id), &mut out);
        }

        let album = at(att, &["styles", "attachment", "all_subattachments", "nodes"])
            .or_else(|| at(att, &["all_subattachments", "nodes"]))
            .and_then(Value::as_array);
        for sub in album.into_iter().flatten() {
            if let Some(m) = sub.get("media") {
                push(media_item(m, None), &mut out);
            }
        }

        if let Some(bare) = att.get("media")
            && type_name(bare) == Some("Video")
        {
            push(media_item(bare, None), &mut out);
        }
    }
    out
}

/// Album size reported by the first attachment that has one.
pub(crate) fn album_total(story: &Value) -> Option<u32> {
    story
        .get("attachments")?
        .as_array()?
        .iter()
        .find_map(|att| {
            u32_at(att, &["styles", "attachment", "all_subattachments", "count"])
                .or_else(|| u32_at(att, &["all_subattachments", "count"]))
        })
}

/// Project one media node. `index` is left at 0 for the caller to assign.
pub(crate) fn media_item(m: &Value, fallback_id: Option<String>) -> Option<MediaItem> {
    let id = str_at(m, &["id"]).or(fallback_id)?;

    if type_name(m) == Some("Video") {
        return Some(MediaItem {
            id,
            kind: MediaKind::Video,
            url: str_at(m, &["playable_url"])
                .or_else(|| str_at(m, &["browser_native_hd_url"]))
                .or_else(|| str_at(m, &["browser_native_sd_url"])),
            width: u32_at(m, &["width"]),
            height: u32_at(m, &["height"]),
            thumbnail: str_at(m, &["preferred_thumbnail", "image", "uri"])
                .or_else(|| str_at(m, &["image", "uri"])),
            index: 0,
        });
    }

    // Link previews also carry an `image`; only photos count as media.
    if !matches!(type_name(m), None | Some("Photo")) {
        return None;
    }
    let image = m.get("photo_image").or_else(|| m.get("image"))?;
    Some(MediaItem {
        id,
        kind: MediaKind::Photo,
        url: str_at(image, &["uri"]),
        width: u32_at(image, &["width"]),
        height: u32_at(image, &["height"]),
        thumbnail: None,
        index: 0,
    })
}

/// One photo-viewer step: the media being shown and the id of the next one.
pub(crate) fn viewer_step(blocks: &[Block]) -> (Option<&Value>, Option<String>) {
    let current = blocks
        .iter()
        .find_map(|b| payload_root(b).get("currMedia").filter(|v| v.is_object()));
    let next = blocks.iter().find_map(|b| {
        payload_root(b)
            .get("nextMediaAfterNodeId")
            .and_then(|n| str_at(n, &["id"]))
    });
    (current, next)
}
