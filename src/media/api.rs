use std::collections::HashSet;

use serde::Serialize;

use crate::{
    core::{FbClient, FbError, MediaItem, client::RetryConfig, graphql::GraphQlQuery},
    decode::{self, DecodeMode},
    extract,
    paginate::{MediaIndex, Page, PageSource},
};

#[derive(Serialize)]
struct ViewerVariables<'a> {
    #[serde(rename = "isMediaset")]
    is_mediaset: bool,
    #[serde(rename = "renderLocation")]
    render_location: &'static str,
    #[serde(rename = "nodeID")]
    node_id: &'a str,
    #[serde(rename = "mediasetToken")]
    mediaset_token: String,
    scale: u8,
    #[serde(rename = "feedLocation")]
    feed_location: &'static str,
    #[serde(rename = "feedbackSource")]
    feedback_source: u8,
    #[serde(rename = "focusCommentID")]
    focus_comment_id: Option<&'a str>,
    #[serde(rename = "privacySelectorRenderLocation")]
    privacy_selector_render_location: &'static str,
    #[serde(rename = "useDefaultActor")]
    use_default_actor: bool,
    #[serde(rename = "shouldShowComments")]
    should_show_comments: bool,
}

pub(super) fn variables(node_id: &str, post_id: &str) -> Result<serde_json::Value, FbError> {
    Ok(serde_json::to_value(ViewerVariables {
        is_mediaset: true,
        render_location: "comet_media_viewer",
        node_id,
        mediaset_token: format!("pcb.{post_id}"),
        scale: 2,
        feed_location: "COMET_MEDIA_VIEWER",
        feedback_source: 65,
        focus_comment_id: None,
        privacy_selector_render_location: "COMET_MEDIA_VIEWER",
        use_default_actor: false,
        should_show_comments: true,
    })?)
}

/// Photo-viewer chain: each "page" is one media node, the cursor the next node id.
pub(super) struct ViewerPages<'a> {
    pub(super) client: &'a FbClient,
    pub(super) start_node_id: &'a str,
    pub(super) post_id: &'a str,
    pub(super) mode: DecodeMode,
    pub(super) retry: Option<&'a RetryConfig>,
    pub(super) visited: HashSet<String>,
}

impl PageSource for ViewerPages<'_> {
    type Record = MediaItem;

    async fn fetch_page(
        &mut self,
        cursor: Option<&str>,
        _page_index: u32,
        media: &mut MediaIndex,
    ) -> Result<Page<MediaItem>, FbError> {
        let node_id = cursor.unwrap_or(self.start_node_id);
        self.visited.insert(node_id.to_string());

        let query = GraphQlQuery {
            doc_id: &self.client.doc_ids().photo_viewer,
            friendly_name: Some("CometPhotoRootContentQuery"),
            variables: variables(node_id, self.post_id)?,
            referer: Some(format!(
                "https://www.facebook.com/photo/?fbid={node_id}&set=pcb.{}",
                self.post_id
            )),
            target: self.post_id,
        };
        let body = self.client.post_graphql(&query, self.retry).await?;
        #[cfg(feature = "debug-dumps")]
        {
            let _ = crate::core::debug::dump_body("media", _page_index, &body);
        }
        let blocks = decode::decode_clean(&body, self.mode)?;

        let mut step = extract::extract_media_step(&blocks, Some(self.post_id), media);
        if let Some(next) = &step.cursor
            && self.visited.contains(next)
        {
            tracing::debug!(next = %next, "media chain looped back; stopping");
            step.cursor = None;
        }
        Ok(Page::from_extraction(step, blocks.len()))
    }
}
