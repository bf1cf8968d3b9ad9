use fbfeed_rs::{BatchBuilder, FeedSource, UnitOutcome};
use httpmock::Method::POST;

use crate::common::{
    GRAPHQL_PATH, album_story, client_for, comment, comments_doc, form_fragment, mock_query,
    setup_server, story, timeline_doc, viewer_doc, wire,
};

const TIMELINE: &str = "ProfileCometTimelineFeedRefetchQuery";
const COMMENTS: &str = "CommentsListComponentsPaginationQuery";
const VIEWER: &str = "CometPhotoRootContentQuery";

#[tokio::test]
async fn each_post_becomes_a_unit_and_failures_do_not_stop_the_run() {
    let server = setup_server();
    let _feed = mock_query(
        &server,
        TIMELINE,
        r#""cursor":null"#,
        wire(&[timeline_doc(
            vec![story("1", "a"), story("2", "b"), story("3", "c")],
            None,
        )]),
    );
    let _c1 = mock_query(
        &server,
        COMMENTS,
        r#""id":"fb_1""#,
        wire(&[comments_doc(vec![comment("c1", "x", None)], None)]),
    );
    let broken = server.mock(|when, then| {
        when.method(POST)
            .path(GRAPHQL_PATH)
            .header("x-fb-friendly-name", COMMENTS)
            .body_includes(form_fragment(r#""id":"fb_2""#));
        then.status(500);
    });
    let _c3 = mock_query(
        &server,
        COMMENTS,
        r#""id":"fb_3""#,
        wire(&[comments_doc(vec![], None)]),
    );

    let client = client_for(&server);
    let units = BatchBuilder::new(&client, FeedSource::Timeline("100".into()))
        .posts(3)
        .run()
        .await
        .unwrap();

    broken.assert_calls(3);
    assert_eq!(units.len(), 3);
    assert_eq!(units[0].outcome, UnitOutcome::Complete);
    assert_eq!(units[0].comments.len(), 1);
    assert!(matches!(units[1].outcome, UnitOutcome::Failed(_)));
    assert!(units[1].comments.is_empty());
    assert_eq!(units[2].outcome, UnitOutcome::Complete);
    assert!(units[2].comments.is_empty());
}

#[tokio::test]
async fn large_albums_are_walked_when_asked() {
    let server = setup_server();
    let _feed = mock_query(
        &server,
        TIMELINE,
        r#""cursor":null"#,
        wire(&[timeline_doc(vec![album_story("p1", &["a1"], 7)], None)]),
    );
    let _comments = mock_query(
        &server,
        COMMENTS,
        r#""id":"fb_p1""#,
        wire(&[comments_doc(vec![], None)]),
    );
    let _a1 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"a1""#,
        wire(&[viewer_doc("a1", Some("a2"), "p1")]),
    );
    let _a2 = mock_query(
        &server,
        VIEWER,
        r#""nodeID":"a2""#,
        wire(&[viewer_doc("a2", None, "p1")]),
    );

    let client = client_for(&server);
    let units = BatchBuilder::new(&client, FeedSource::Timeline("100".into()))
        .posts(1)
        .walk_albums(true)
        .run()
        .await
        .unwrap();

    assert_eq!(units.len(), 1);
    let media: Vec<&str> = units[0].post.media.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(media, vec!["a1", "a2"]);
    assert_eq!(units[0].outcome, UnitOutcome::Complete);
}

#[tokio::test]
async fn failed_feed_fails_the_run() {
    let server = setup_server();
    let _feed = server.mock(|when, then| {
        when.method(POST).path(GRAPHQL_PATH);
        then.status(502);
    });
    let client = client_for(&server);
    let err = BatchBuilder::new(&client, FeedSource::Group("g".into()))
        .run()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
}
