use fbfeed_rs::decode::{DecodeMode, decode_clean};
use fbfeed_rs::extract;
use fbfeed_rs::{EntityKind, ExtractOptions, MediaIndex, MediaKind};
use serde_json::json;

use crate::common::{viewer_doc, wire};

#[test]
fn viewer_step_yields_current_media_and_next_id() {
    let blocks = decode_clean(&wire(&[viewer_doc("m5", Some("m6"), "p1")]), DecodeMode::Scan).unwrap();
    let mut index = MediaIndex::default();
    index.next("p1");
    index.next("p1");

    let ex = extract::extract_media_step(&blocks, Some("p1"), &mut index);
    assert_eq!(ex.records.len(), 1);
    let item = &ex.records[0];
    assert_eq!(item.id, "m5");
    assert_eq!(item.kind, MediaKind::Photo);
    assert_eq!(item.url.as_deref(), Some("https://scontent.example/m5.jpg"));
    assert_eq!(item.index, 3);
    assert_eq!(ex.cursor.as_deref(), Some("m6"));
}

#[test]
fn last_viewer_step_has_no_cursor() {
    let blocks = decode_clean(&wire(&[viewer_doc("m9", None, "p1")]), DecodeMode::Scan).unwrap();
    let ex = extract::extract(&blocks, EntityKind::Media, &ExtractOptions::default());
    assert_eq!(ex.records.len(), 1);
    assert_eq!(ex.records[0].identity(), "m9");
    assert_eq!(ex.cursor, None);
}

#[test]
fn index_scope_falls_back_to_post_named_in_response() {
    let blocks = decode_clean(&wire(&[viewer_doc("m1", None, "p7")]), DecodeMode::Scan).unwrap();
    let mut index = MediaIndex::default();
    let ex = extract::extract_media_step(&blocks, None, &mut index);
    assert_eq!(ex.records[0].index, 1);
    assert_eq!(index.count("p7"), 1);
}

#[test]
fn link_previews_are_not_media() {
    let doc = json!({ "data": { "currMedia": {
        "__typename": "ExternalUrl", "id": "link1", "image": { "uri": "https://x/y.png" }
    } } });
    let blocks = decode_clean(&wire(&[doc]), DecodeMode::Scan).unwrap();
    let ex = extract::extract_media_step(&blocks, Some("p"), &mut MediaIndex::default());
    assert!(ex.records.is_empty());
    assert_eq!(ex.nodes_seen, 1);
}
