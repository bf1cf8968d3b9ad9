//! Form-encoded GraphQL request description.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::FbError;

/// One GraphQL POST: a pinned query document plus its JSON variables.
#[derive(Debug, Clone)]
pub(crate) struct GraphQlQuery<'a> {
    pub(crate) doc_id: &'a str,
    /// Sent as `x-fb-friendly-name`; some documents are rejected without it.
    pub(crate) friendly_name: Option<&'static str>,
    pub(crate) variables: Value,
    pub(crate) referer: Option<String>,
    /// Id the request is about; only used to name recorded fixtures.
    pub(crate) target: &'a str,
}

impl GraphQlQuery<'_> {
    /// Body fields in the order the web client sends them.
    pub(crate) fn form_fields(&self) -> Result<Vec<(&'static str, String)>, FbError> {
        Ok(vec![
            ("av", "0".to_string()),
            ("__user", "0".to_string()),
            ("__a", "1".to_string()),
            ("doc_id", self.doc_id.to_string()),
            ("variables", serde_json::to_string(&self.variables)?),
        ])
    }

    pub(crate) fn fixture_key(&self) -> &str {
        self.friendly_name.unwrap_or(self.doc_id)
    }
}

/// Feedback id of a post: base64 of `feedback:<post_id>`.
///
/// Lets the comment fetcher run from a bare post id without first loading the post.
#[must_use]
pub fn feedback_id_for_post(post_id: &str) -> String {
    STANDARD.encode(format!("feedback:{post_id}"))
}
