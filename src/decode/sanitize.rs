use serde_json::Value;

use super::Block;

/// Top-level keys carrying upstream diagnostics rather than payload.
const NOISY_KEYS: [&str; 2] = ["errors", "extensions"];

/// Remove `errors` and `extensions` from every block, keeping block order and
/// the order of the remaining keys. Applying it twice changes nothing.
#[must_use]
pub fn sanitize(blocks: Vec<Block>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|mut block| {
            for key in NOISY_KEYS {
                block.remove(key);
            }
            block
        })
        .collect()
}

/// Like [`sanitize`] for values of unknown shape: anything that is not an
/// object is dropped first.
#[must_use]
pub fn sanitize_values(values: Vec<Value>) -> Vec<Block> {
    sanitize(objects_only(values))
}

pub(super) fn objects_only(values: Vec<Value>) -> Vec<Block> {
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}
