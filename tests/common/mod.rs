#![allow(dead_code)]

use std::time::Duration;

use fbfeed_rs::{Backoff, FbClient, RetryConfig};
use httpmock::{Method::POST, Mock, MockServer};
use serde_json::{Value, json};
use url::Url;

pub const GRAPHQL_PATH: &str = "/api/graphql/";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// Retries without sleeping, so failure paths run instantly.
pub fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        backoff: Backoff::Fixed(Duration::ZERO),
        ..RetryConfig::default()
    }
}

/// A client pointed at the mock server with pacing turned off.
pub fn client_for(server: &MockServer) -> FbClient {
    FbClient::builder()
        .base_graphql(Url::parse(&format!("{}{GRAPHQL_PATH}", server.base_url())).unwrap())
        .retry_config(fast_retry(3))
        .page_delay(Duration::ZERO)
        .unit_delay(Duration::ZERO)
        .build()
        .unwrap()
}

/// A JSON fragment as it appears inside the form-encoded `variables` field.
pub fn form_fragment(fragment: &str) -> String {
    url::form_urlencoded::byte_serialize(fragment.as_bytes()).collect()
}

/// Body as the endpoint sends it: the anti-hijacking prefix, then the documents
/// one per line.
pub fn wire(docs: &[Value]) -> String {
    let lines: Vec<String> = docs.iter().map(Value::to_string).collect();
    format!("for (;;);{}", lines.join("\n"))
}

pub fn page_info(next: Option<&str>) -> Value {
    match next {
        Some(c) => json!({ "has_next_page": true, "end_cursor": c }),
        None => json!({ "has_next_page": false, "end_cursor": null }),
    }
}

pub fn story(post_id: &str, text: &str) -> Value {
    json!({
        "__typename": "Story",
        "id": format!("UzpfS{post_id}"),
        "post_id": post_id,
        "creation_time": 1_700_000_000,
        "permalink_url": format!("https://www.facebook.com/permalink.php?story_fbid={post_id}"),
        "feedback": { "id": format!("fb_{post_id}") },
        "comet_sections": {
            "content": { "story": { "message": { "text": text } } },
            "feedback": { "story": { "feedback_context": { "feedback_target_with_context": {
                "comet_ufi_summary_and_actions_renderer": { "feedback": {
                    "reaction_count": { "count": 12 }
                } }
            } } } }
        },
        "attachments": []
    })
}

pub fn photo(id: &str) -> Value {
    json!({
        "__typename": "Photo",
        "id": id,
        "photo_image": { "uri": format!("https://scontent.example/{id}.jpg"), "width": 960, "height": 720 }
    })
}

/// A story whose single attachment is an album of `ids`, reporting `total` items.
pub fn album_story(post_id: &str, ids: &[&str], total: u32) -> Value {
    let mut s = story(post_id, "album");
    let nodes: Vec<Value> = ids.iter().map(|id| json!({ "media": photo(id) })).collect();
    s["attachments"] = json!([{
        "styles": { "attachment": {
            "all_subattachments": { "count": total, "nodes": nodes }
        } }
    }]);
    s
}

pub fn timeline_doc(stories: Vec<Value>, next: Option<&str>) -> Value {
    let edges: Vec<Value> = stories.into_iter().map(|n| json!({ "node": n })).collect();
    json!({
        "data": { "node": { "timeline_list_feed_units": {
            "edges": edges,
            "page_info": page_info(next)
        } } },
        "extensions": { "is_final": true }
    })
}

pub fn comment(id: &str, text: &str, expansion_token: Option<&str>) -> Value {
    let mut feedback = json!({ "id": format!("fb_{id}") });
    if let Some(tok) = expansion_token {
        feedback["expansion_info"] = json!({ "expansion_token": tok });
    }
    json!({
        "__typename": "Comment",
        "id": format!("Y29tbWVudDo{id}"),
        "legacy_fbid": id,
        "author": { "id": format!("u{id}"), "name": format!("Author {id}") },
        "body": { "text": text },
        "created_time": 1_700_000_100,
        "feedback": feedback
    })
}

pub fn comments_doc(comments: Vec<Value>, next: Option<&str>) -> Value {
    let edges: Vec<Value> = comments.into_iter().map(|n| json!({ "node": n })).collect();
    json!({
        "data": { "node": { "comment_rendering_instance_for_feed_location": { "comments": {
            "edges": edges,
            "page_info": page_info(next)
        } } } },
        "extensions": { "is_final": true }
    })
}

pub fn replies_doc(replies: &[(&str, &str)]) -> Value {
    let edges: Vec<Value> = replies
        .iter()
        .map(|(id, text)| {
            json!({ "node": {
                "legacy_fbid": id,
                "author": { "id": "u9", "name": "Replier" },
                "body": { "text": text },
                "created_time": 1_700_000_200
            } })
        })
        .collect();
    json!({
        "data": { "node": { "replies_connection": {
            "edges": edges,
            "page_info": page_info(None)
        } } }
    })
}

pub fn viewer_doc(media_id: &str, next: Option<&str>, post_id: &str) -> Value {
    let mut data = json!({
        "currMedia": photo(media_id),
        "mediaset": { "post_id": post_id }
    });
    if let Some(n) = next {
        data["nextMediaAfterNodeId"] = json!({ "id": n });
    }
    json!({ "data": data })
}

/// Mock for one GraphQL document, narrowed to requests whose body contains `fragment`.
pub fn mock_query<'a>(
    server: &'a MockServer,
    friendly_name: &str,
    fragment: &str,
    body: String,
) -> Mock<'a> {
    let fragment = form_fragment(fragment);
    server.mock(|when, then| {
        when.method(POST)
            .path(GRAPHQL_PATH)
            .header("x-fb-friendly-name", friendly_name)
            .body_includes(fragment);
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(body);
    })
}
