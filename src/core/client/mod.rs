//! Public client surface + builder.
//! Internals are split into `constants` (UA, endpoint, query documents) and `retry`.

mod constants;
/// Retry configuration and the `with_retry` combinator.
pub mod retry;

pub use retry::{Backoff, RetryConfig, with_retry};

use crate::core::{FbError, graphql::GraphQlQuery, net};
use constants::{
    DEFAULT_BASE_GRAPHQL, DEFAULT_ORIGIN, DOC_COMMENTS, DOC_GROUP_FEED, DOC_PHOTO_VIEWER,
    DOC_REPLIES, DOC_TIMELINE_FEED, USER_AGENT,
};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use url::Url;

/// Query-document identifiers, one per server-side query.
///
/// The upstream pins these to deployed client versions and rotates them without
/// notice, so every id can be overridden through [`FbClientBuilder::doc_ids`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocIds {
    /// Profile/page timeline feed.
    pub timeline_feed: String,
    /// Group discussion feed.
    pub group_feed: String,
    /// Top-level comments under a feedback node.
    pub comments: String,
    /// Replies under one comment.
    pub replies: String,
    /// Photo viewer (one media node per request).
    pub photo_viewer: String,
}

impl Default for DocIds {
    fn default() -> Self {
        Self {
            timeline_feed: DOC_TIMELINE_FEED.to_string(),
            group_feed: DOC_GROUP_FEED.to_string(),
            comments: DOC_COMMENTS.to_string(),
            replies: DOC_REPLIES.to_string(),
            photo_viewer: DOC_PHOTO_VIEWER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FbClient {
    http: Client,
    base_graphql: Url,
    headers: HeaderMap,
    doc_ids: DocIds,
    retry: RetryConfig,
    page_delay: Duration,
    unit_delay: Duration,
}

impl Default for FbClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl FbClient {
    /// Create a new builder.
    pub fn builder() -> FbClientBuilder {
        FbClientBuilder::default()
    }

    /// The GraphQL endpoint every query is posted to.
    pub fn base_graphql(&self) -> &Url {
        &self.base_graphql
    }

    /// Query-document ids in use.
    pub fn doc_ids(&self) -> &DocIds {
        &self.doc_ids
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn page_delay(&self) -> Duration {
        self.page_delay
    }
    pub(crate) fn unit_delay(&self) -> Duration {
        self.unit_delay
    }

    /// The client-wide retry policy.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Send a request and read its body, both inside the retry policy.
    ///
    /// An attempt fails on a non-success status (its body is discarded) or on
    /// a transport error while sending or while the body streams in.
    pub(crate) async fn send_with_retry(
        &self,
        req: RequestBuilder,
        retry_override: Option<&RetryConfig>,
        fixture_key: &str,
        target: &str,
    ) -> Result<String, FbError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        with_retry(cfg, |_attempt| {
            let attempt_req = req.try_clone();
            async move {
                let attempt_req = attempt_req
                    .ok_or_else(|| FbError::InvalidParams("request body is not cloneable".into()))?;
                let resp = attempt_req.send().await?;
                if !resp.status().is_success() {
                    return Err(FbError::Status {
                        status: resp.status().as_u16(),
                        url: resp.url().to_string(),
                    });
                }
                Ok(net::get_text(resp, fixture_key, target, "txt").await?)
            }
        })
        .await
    }

    /// POST one GraphQL query document and return the raw response body.
    pub(crate) async fn post_graphql(
        &self,
        query: &GraphQlQuery<'_>,
        retry_override: Option<&RetryConfig>,
    ) -> Result<String, FbError> {
        let mut req = self
            .http
            .post(self.base_graphql.clone())
            .headers(self.headers.clone())
            .form(&query.form_fields()?);
        if let Some(name) = query.friendly_name {
            req = req.header("x-fb-friendly-name", name);
        }
        if let Some(referer) = &query.referer {
            req = req.header(reqwest::header::REFERER, referer.as_str());
        }

        self.send_with_retry(req, retry_override, query.fixture_key(), query.target)
            .await
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FbClientBuilder {
    user_agent: Option<String>,
    base_graphql: Option<Url>,
    doc_ids: Option<DocIds>,
    headers: Vec<(String, String)>,
    proxy: Option<reqwest::Proxy>,
    custom_client: Option<Client>,
    retry: Option<RetryConfig>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    page_delay: Option<Duration>,
    unit_delay: Option<Duration>,
}

impl FbClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the GraphQL endpoint (e.g., `https://www.facebook.com/api/graphql/`).
    pub fn base_graphql(mut self, url: Url) -> Self {
        self.base_graphql = Some(url);
        self
    }

    /// Replace the query-document ids.
    pub fn doc_ids(mut self, ids: DocIds) -> Self {
        self.doc_ids = Some(ids);
        self
    }

    /// Add a header sent with every GraphQL request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Route requests through a proxy. Ignored when a custom client is supplied.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Route all traffic through the proxy at `url`.
    ///
    /// # Errors
    ///
    /// Returns `FbError::InvalidParams` if the URL is not a valid proxy URL.
    pub fn try_proxy(self, url: &str) -> Result<Self, FbError> {
        let proxy = reqwest::Proxy::all(url)
            .map_err(|e| FbError::InvalidParams(format!("invalid proxy url `{url}`: {e}")))?;
        Ok(self.proxy(proxy))
    }

    /// Use a preconfigured `reqwest::Client`. UA, proxy and timeouts set on this
    /// builder are then ignored.
    pub fn custom_client(mut self, client: Client) -> Self {
        self.custom_client = Some(client);
        self
    }

    /// Set the default retry policy.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Enable or disable retries while keeping the rest of the policy.
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        let mut cfg = self.retry.take().unwrap_or_default();
        cfg.enabled = enabled;
        self.retry = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Delay between consecutive page requests of one fetch. Default: 1s.
    /// `Duration::ZERO` disables pacing.
    pub fn page_delay(mut self, dur: Duration) -> Self {
        self.page_delay = Some(dur);
        self
    }

    /// Delay between units (posts) processed by the batch driver. Default: 1s.
    pub fn unit_delay(mut self, dur: Duration) -> Self {
        self.unit_delay = Some(dur);
        self
    }

    pub fn build(self) -> Result<FbClient, FbError> {
        let base_graphql = match self.base_graphql {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_GRAPHQL)?,
        };

        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::ORIGIN, HeaderValue::from_static(DEFAULT_ORIGIN));
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FbError::InvalidParams(format!("header name `{name}`: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FbError::InvalidParams(format!("header value for `{name}`: {e}")))?;
            headers.insert(name, value);
        }

        let http = match self.custom_client {
            Some(c) => c,
            None => {
                let mut httpb = reqwest::Client::builder()
                    .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
                    .cookie_store(true);
                if let Some(t) = self.timeout {
                    httpb = httpb.timeout(t);
                }
                if let Some(ct) = self.connect_timeout {
                    httpb = httpb.connect_timeout(ct);
                }
                if let Some(p) = self.proxy {
                    httpb = httpb.proxy(p);
                }
                httpb.build()?
            }
        };

        Ok(FbClient {
            http,
            base_graphql,
            headers,
            doc_ids: self.doc_ids.unwrap_or_default(),
            retry: self.retry.unwrap_or_default(),
            page_delay: self.page_delay.unwrap_or(Duration::from_secs(1)),
            unit_delay: self.unit_delay.unwrap_or(Duration::from_secs(1)),
        })
    }
}
