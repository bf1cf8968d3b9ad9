use std::time::Duration;

use fbfeed_rs::{FbError, FetchOutcome, PostsBuilder};
use httpmock::Method::POST;

use crate::common::{GRAPHQL_PATH, client_for, fast_retry, setup_server, story, timeline_doc, wire};

#[tokio::test]
async fn server_errors_exhaust_the_retry_policy() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(GRAPHQL_PATH);
        then.status(503).body("unavailable");
    });

    let client = client_for(&server);
    let err = PostsBuilder::timeline(&client, "1")
        .retry_policy(Some(fast_retry(4)))
        .fetch()
        .await
        .unwrap_err();

    mock.assert_calls(4);
    match err {
        FbError::RetryExhausted { attempts, last } => {
            assert_eq!(attempts, 4);
            assert_eq!(last.status(), Some(503));
        }
        other => panic!("expected RetryExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn body_without_data_is_retried_then_ends_the_feed() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(GRAPHQL_PATH);
        then.status(200).body("for (;;);{\"error\":1357004,\"errorSummary\":\"Sorry\"}");
    });

    let client = client_for(&server);
    let feed = PostsBuilder::timeline(&client, "1")
        .page_attempts(3)
        .fetch()
        .await
        .unwrap();

    mock.assert_calls(3);
    assert!(feed.posts.is_empty());
    assert_eq!(feed.outcome, FetchOutcome::EndOfData);
}

#[tokio::test]
async fn rate_limited_body_is_retried_then_ends_the_feed() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(GRAPHQL_PATH);
        then.status(200).body(
            r#"for (;;);{"data":null,"errors":[{"message":"Rate limit exceeded","code":1675004}]}"#,
        );
    });

    let client = client_for(&server);
    let feed = PostsBuilder::timeline(&client, "1")
        .page_attempts(3)
        .fetch()
        .await
        .unwrap();

    mock.assert_calls(3);
    assert!(feed.posts.is_empty());
    assert_eq!(feed.outcome, FetchOutcome::EndOfData);
}

#[tokio::test]
async fn slow_responses_go_through_the_retry_policy() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(POST).path(GRAPHQL_PATH);
        then.status(200)
            .delay(Duration::from_millis(500))
            .body(wire(&[timeline_doc(vec![story("1", "a")], None)]));
    });

    let client = fbfeed_rs::FbClient::builder()
        .base_graphql(url::Url::parse(&format!("{}{GRAPHQL_PATH}", server.base_url())).unwrap())
        .timeout(Duration::from_millis(50))
        .page_delay(Duration::ZERO)
        .build()
        .unwrap();
    let err = PostsBuilder::timeline(&client, "1")
        .retry_policy(Some(fast_retry(2)))
        .fetch()
        .await
        .unwrap_err();

    mock.assert_calls(2);
    match err {
        FbError::RetryExhausted { attempts, last } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last, FbError::Http(ref e) if e.is_timeout()), "got {last:?}");
        }
        other => panic!("expected RetryExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn page_delay_override_is_accepted() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(POST).path(GRAPHQL_PATH);
        then.status(200)
            .body(wire(&[timeline_doc(vec![story("1", "a")], None)]));
    });

    let client = client_for(&server);
    let feed = PostsBuilder::timeline(&client, "1")
        .page_delay(Duration::from_millis(1))
        .fetch()
        .await
        .unwrap();
    assert_eq!(feed.posts.len(), 1);
}
