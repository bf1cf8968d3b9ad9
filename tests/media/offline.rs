use fbfeed_rs::{FbError, FetchOutcome, MediaChainBuilder, ParentPostInfo};

use crate::common::{client_for, mock_query, setup_server, viewer_doc, wire};

const VIEWER: &str = "CometPhotoRootContentQuery";

#[tokio::test]
async fn walks_chain_until_no_next_node() {
    let server = setup_server();
    let m1 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"m1""#,
        wire(&[viewer_doc("m1", Some("m2"), "p1")]),
    );
    let m2 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"m2""#,
        wire(&[viewer_doc("m2", Some("m3"), "p1")]),
    );
    let m3 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"m3""#,
        wire(&[viewer_doc("m3", None, "p1")]),
    );

    let client = client_for(&server);
    let walk = MediaChainBuilder::new(&client, "m1", "p1").fetch().await.unwrap();

    m1.assert();
    m2.assert();
    m3.assert();
    let got: Vec<(&str, u32)> = walk.items.iter().map(|m| (m.id.as_str(), m.index)).collect();
    assert_eq!(got, vec![("m1", 1), ("m2", 2), ("m3", 3)]);
    assert_eq!(walk.post_id, "p1");
    assert_eq!(walk.outcome, FetchOutcome::Exhausted);
}

#[tokio::test]
async fn request_names_the_mediaset() {
    let server = setup_server();
    let mock = mock_query(
        &server,
        VIEWER,
        r#""mediasetToken":"pcb.p42""#,
        wire(&[viewer_doc("m1", None, "p42")]),
    );
    let client = client_for(&server);
    let walk = MediaChainBuilder::new(&client, "m1", "p42").fetch().await.unwrap();
    mock.assert();
    assert_eq!(walk.items.len(), 1);
}

#[tokio::test]
async fn loop_back_to_a_visited_node_stops_the_walk() {
    let server = setup_server();
    let m1 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"m1""#,
        wire(&[viewer_doc("m1", Some("m2"), "p1")]),
    );
    let m2 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"m2""#,
        wire(&[viewer_doc("m2", Some("m1"), "p1")]),
    );

    let client = client_for(&server);
    let walk = MediaChainBuilder::new(&client, "m1", "p1").fetch().await.unwrap();

    m1.assert_calls(1);
    m2.assert_calls(1);
    assert_eq!(walk.items.len(), 2);
    assert_eq!(walk.outcome, FetchOutcome::Exhausted);
}

#[tokio::test]
async fn max_items_caps_the_walk() {
    let server = setup_server();
    let _m1 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"m1""#,
        wire(&[viewer_doc("m1", Some("m2"), "p1")]),
    );
    let m2 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"m2""#,
        wire(&[viewer_doc("m2", Some("m3"), "p1")]),
    );

    let client = client_for(&server);
    let walk = MediaChainBuilder::new(&client, "m1", "p1")
        .max_items(1)
        .fetch()
        .await
        .unwrap();
    assert_eq!(m2.calls(), 0);
    assert_eq!(walk.items.len(), 1);
    assert_eq!(walk.outcome, FetchOutcome::Complete);
}

#[tokio::test]
async fn from_parent_needs_a_first_media_id() {
    let server = setup_server();
    let client = client_for(&server);

    let without = ParentPostInfo {
        story_id: "s".into(),
        first_media_id: None,
    };
    assert!(MediaChainBuilder::from_parent(&client, &without).is_none());

    let with = ParentPostInfo {
        story_id: "s".into(),
        first_media_id: Some("m1".into()),
    };
    assert!(MediaChainBuilder::from_parent(&client, &with).is_some());
}

#[tokio::test]
async fn empty_ids_are_rejected() {
    let server = setup_server();
    let client = client_for(&server);
    let err = MediaChainBuilder::new(&client, "", "p1").fetch().await.unwrap_err();
    assert!(matches!(err, FbError::InvalidParams(_)));
}
