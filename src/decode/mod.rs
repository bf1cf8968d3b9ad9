//! Recover JSON blocks from raw GraphQL response bodies.
//!
//! The endpoint prefixes bodies with `for (;;);` so they cannot be evaluated as
//! script, and depending on the query document it answers with one JSON
//! document, several newline-separated documents, or `"data"` payloads embedded
//! in non-JSON text. [`decode`] handles both families through [`DecodeMode`].

mod sanitize;
mod scan;

pub use sanitize::{sanitize, sanitize_values};

use serde_json::{Map, Value};

use crate::core::FbError;

/// One independently parsed top-level JSON object.
pub type Block = Map<String, Value>;

/// Anti-hijacking prefix emitted in front of every body.
pub const HIJACK_PREFIX: &str = "for (;;);";

/// How a body is turned into blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// The first line is one complete JSON document; anything after it is ignored.
    /// A malformed document is an error since there is nothing to fall back to.
    SingleObject,
    /// Collect every balanced object following a `"data"` key, skipping noise
    /// and unparsable fragments.
    #[default]
    Scan,
}

/// Remove the anti-hijacking prefix if the body starts with it.
#[must_use]
pub fn strip_prefix(raw: &str) -> &str {
    let trimmed = raw.trim_start();
    trimmed.strip_prefix(HIJACK_PREFIX).unwrap_or(trimmed).trim()
}

/// Decode a raw body into blocks.
///
/// An empty result is not an error: it means the page carried no data.
///
/// # Errors
///
/// Only [`DecodeMode::SingleObject`] fails, with `FbError::Json`, when the
/// first line is not valid JSON.
pub fn decode(raw: &str, mode: DecodeMode) -> Result<Vec<Block>, FbError> {
    let text = strip_prefix(raw);
    let values = match mode {
        DecodeMode::SingleObject => {
            let first = text.lines().next().unwrap_or_default().trim();
            if first.is_empty() {
                return Ok(Vec::new());
            }
            vec![serde_json::from_str::<Value>(first)?]
        }
        DecodeMode::Scan => scan::scan_data_objects(text),
    };

    let blocks = sanitize::objects_only(values);
    tracing::trace!(?mode, blocks = blocks.len(), "decoded body");
    Ok(blocks)
}

/// [`decode`] followed by [`sanitize`].
///
/// # Errors
///
/// See [`decode`].
pub fn decode_clean(raw: &str, mode: DecodeMode) -> Result<Vec<Block>, FbError> {
    decode(raw, mode).map(sanitize)
}
