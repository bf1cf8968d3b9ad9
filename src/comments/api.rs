use serde::Serialize;

use crate::{
    core::{Comment, FbClient, FbError, Reply, client::RetryConfig, graphql::GraphQlQuery},
    decode::{self, Block, DecodeMode},
    extract,
    paginate::{MediaIndex, Page, PageSource},
};

const REFERER: &str = "https://www.facebook.com/";

#[derive(Serialize)]
struct CommentVariables<'a> {
    #[serde(rename = "commentsAfterCount")]
    comments_after_count: i32,
    #[serde(rename = "commentsAfterCursor")]
    comments_after_cursor: Option<&'a str>,
    #[serde(rename = "feedLocation")]
    feed_location: &'static str,
    #[serde(rename = "focusCommentID")]
    focus_comment_id: Option<&'a str>,
    scale: u8,
    #[serde(rename = "useDefaultActor")]
    use_default_actor: bool,
    id: &'a str,
}

#[derive(Serialize)]
struct ReplyVariables<'a> {
    #[serde(rename = "clientKey")]
    client_key: Option<&'a str>,
    #[serde(rename = "expansionToken")]
    expansion_token: &'a str,
    #[serde(rename = "feedLocation")]
    feed_location: &'static str,
    #[serde(rename = "focusCommentID")]
    focus_comment_id: Option<&'a str>,
    scale: u8,
    #[serde(rename = "useDefaultActor")]
    use_default_actor: bool,
    id: &'a str,
}

pub(super) fn comment_variables(
    feedback_id: &str,
    cursor: Option<&str>,
) -> Result<serde_json::Value, FbError> {
    Ok(serde_json::to_value(CommentVariables {
        comments_after_count: -1,
        comments_after_cursor: cursor,
        feed_location: "POST_PERMALINK_DIALOG",
        focus_comment_id: None,
        scale: 2,
        use_default_actor: false,
        id: feedback_id,
    })?)
}

pub(super) fn reply_variables(
    feedback_id: &str,
    expansion_token: &str,
) -> Result<serde_json::Value, FbError> {
    Ok(serde_json::to_value(ReplyVariables {
        client_key: None,
        expansion_token,
        feed_location: "POST_PERMALINK_DIALOG",
        focus_comment_id: None,
        scale: 2,
        use_default_actor: false,
        id: feedback_id,
    })?)
}

/// Pages of top-level comments under one feedback node.
pub(super) struct CommentPages<'a> {
    pub(super) client: &'a FbClient,
    pub(super) feedback_id: &'a str,
    pub(super) mode: DecodeMode,
    pub(super) retry: Option<&'a RetryConfig>,
}

impl PageSource for CommentPages<'_> {
    type Record = Comment;

    async fn fetch_page(
        &mut self,
        cursor: Option<&str>,
        _page_index: u32,
        _media: &mut MediaIndex,
    ) -> Result<Page<Comment>, FbError> {
        let query = GraphQlQuery {
            doc_id: &self.client.doc_ids().comments,
            friendly_name: Some("CommentsListComponentsPaginationQuery"),
            variables: comment_variables(self.feedback_id, cursor)?,
            referer: Some(REFERER.to_string()),
            target: self.feedback_id,
        };
        let body = self.client.post_graphql(&query, self.retry).await?;
        #[cfg(feature = "debug-dumps")]
        {
            let _ = crate::core::debug::dump_body("comments", _page_index, &body);
        }
        let blocks = decode::decode_clean(&body, self.mode)?;
        Ok(Page::from_extraction(extract::extract_comments(&blocks), blocks.len()))
    }
}

/// One single-shot reply request for a comment.
///
/// A response with no data at all (an upstream error body) is an
/// `FbError::Data`, so the caller counts it as a failed reply fetch.
pub(super) async fn fetch_replies(
    client: &FbClient,
    feedback_id: &str,
    expansion_token: &str,
    mode: DecodeMode,
    retry: Option<&RetryConfig>,
) -> Result<Vec<Reply>, FbError> {
    let query = GraphQlQuery {
        doc_id: &client.doc_ids().replies,
        friendly_name: Some("Depth1CommentsListPaginationQuery"),
        variables: reply_variables(feedback_id, expansion_token)?,
        referer: Some(REFERER.to_string()),
        target: feedback_id,
    };
    let body = client.post_graphql(&query, retry).await?;
    let blocks = decode::decode_clean(&body, mode)?;
    if !blocks.iter().any(carries_data) {
        return Err(FbError::Data(format!(
            "reply response for {feedback_id} carried no data"
        )));
    }
    Ok(extract::extract_replies(&blocks).records)
}

/// False for what is left of an error body once sanitized: `{}` or `{"data":null}`.
fn carries_data(block: &Block) -> bool {
    !block.is_empty() && !block.get("data").is_some_and(serde_json::Value::is_null)
}
