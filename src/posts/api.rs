use serde::Serialize;

use crate::{
    core::{FbClient, FbError, ParentPostInfo, Post, client::RetryConfig, graphql::GraphQlQuery},
    decode::{self, DecodeMode},
    extract::{self, ExtractOptions},
    paginate::{MediaIndex, Page, PageSource},
    posts::FeedSource,
};

#[derive(Serialize)]
struct TimelineVariables<'a> {
    count: u32,
    cursor: Option<&'a str>,
    id: &'a str,
    #[serde(rename = "feedLocation")]
    feed_location: &'static str,
    #[serde(rename = "renderLocation")]
    render_location: &'static str,
    scale: u8,
    #[serde(rename = "useDefaultActor")]
    use_default_actor: bool,
}

#[derive(Serialize)]
struct GroupVariables<'a> {
    count: u32,
    cursor: Option<&'a str>,
    #[serde(rename = "feedLocation")]
    feed_location: &'static str,
    #[serde(rename = "feedType")]
    feed_type: &'static str,
    #[serde(rename = "feedbackSource")]
    feedback_source: u8,
    #[serde(rename = "filterTopicId")]
    filter_topic_id: Option<&'a str>,
    #[serde(rename = "focusCommentID")]
    focus_comment_id: Option<&'a str>,
    #[serde(rename = "privacySelectorRenderLocation")]
    privacy_selector_render_location: &'static str,
    #[serde(rename = "renderLocation")]
    render_location: &'static str,
    scale: u8,
    stream_initial_count: u32,
    #[serde(rename = "useDefaultActor")]
    use_default_actor: bool,
    id: &'a str,
}

pub(super) fn variables(
    source: &FeedSource,
    cursor: Option<&str>,
    per_page: u32,
) -> Result<serde_json::Value, FbError> {
    let v = match source {
        FeedSource::Timeline(id) => serde_json::to_value(TimelineVariables {
            count: per_page,
            cursor,
            id,
            feed_location: "TIMELINE",
            render_location: "timeline",
            scale: 2,
            use_default_actor: false,
        })?,
        FeedSource::Group(id) => serde_json::to_value(GroupVariables {
            count: per_page,
            cursor,
            feed_location: "GROUP",
            feed_type: "DISCUSSION",
            feedback_source: 0,
            filter_topic_id: None,
            focus_comment_id: None,
            privacy_selector_render_location: "COMET_STREAM",
            render_location: "group",
            scale: 2,
            stream_initial_count: 1,
            use_default_actor: false,
            id,
        })?,
    };
    Ok(v)
}

/// Pages of one timeline or group feed.
pub(super) struct FeedPages<'a> {
    pub(super) client: &'a FbClient,
    pub(super) source: &'a FeedSource,
    pub(super) per_page: u32,
    pub(super) mode: DecodeMode,
    pub(super) opts: ExtractOptions,
    pub(super) retry: Option<&'a RetryConfig>,
    pub(super) parent: Option<ParentPostInfo>,
}

impl PageSource for FeedPages<'_> {
    type Record = Post;

    async fn fetch_page(
        &mut self,
        cursor: Option<&str>,
        page_index: u32,
        media: &mut MediaIndex,
    ) -> Result<Page<Post>, FbError> {
        let (doc_id, friendly_name, referer) = match self.source {
            FeedSource::Timeline(id) => (
                self.client.doc_ids().timeline_feed.as_str(),
                "ProfileCometTimelineFeedRefetchQuery",
                format!("https://www.facebook.com/profile.php?id={id}"),
            ),
            FeedSource::Group(id) => (
                self.client.doc_ids().group_feed.as_str(),
                "GroupsCometFeedRegularStoriesPaginationQuery",
                format!("https://www.facebook.com/groups/{id}/"),
            ),
        };
        let query = GraphQlQuery {
            doc_id,
            friendly_name: Some(friendly_name),
            variables: variables(self.source, cursor, self.per_page)?,
            referer: Some(referer),
            target: self.source.id(),
        };

        let body = self.client.post_graphql(&query, self.retry).await?;
        #[cfg(feature = "debug-dumps")]
        {
            let _ = crate::core::debug::dump_body(self.source.label(), page_index, &body);
        }
        let blocks = decode::decode_clean(&body, self.mode)?;

        if page_index == 1 {
            self.parent = extract::parent_post_info(&blocks);
        }
        let extraction = extract::extract_posts(&blocks, &self.opts, media);
        Ok(Page::from_extraction(extraction, blocks.len()))
    }
}
