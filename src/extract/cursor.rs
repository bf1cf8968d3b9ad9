use serde_json::Value;

use super::helpers::payload_root;
use crate::decode::Block;

/// Opaque pagination token, echoed back verbatim to get the next page.
pub type Cursor = String;

/// `end_cursor` of a page-info object, only when `has_next_page` is `true`.
#[must_use]
pub fn cursor_from_page_info(page_info: &Value) -> Option<Cursor> {
    if page_info.get("has_next_page").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    page_info
        .get("end_cursor")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Next cursor for a page.
///
/// The first page-info found decides, looked up in this order: the one next to
/// a matched edge list (`colocated`), a top-level `page_info` block (streamed
/// separately by group feeds), then any object in the blocks that has a
/// `has_next_page` field.
#[must_use]
pub fn find_cursor(blocks: &[Block], colocated: Option<&Value>) -> Option<Cursor> {
    let page_info = colocated
        .or_else(|| {
            blocks
                .iter()
                .find_map(|b| payload_root(b).get("page_info").filter(|p| p.is_object()))
        })
        .or_else(|| {
            blocks
                .iter()
                .find_map(|b| b.values().find_map(find_page_info_like))
        })?;
    cursor_from_page_info(page_info)
}

fn find_page_info_like(v: &Value) -> Option<&Value> {
    match v {
        Value::Object(map) => {
            if map.contains_key("has_next_page") {
                return Some(v);
            }
            map.values().find_map(find_page_info_like)
        }
        Value::Array(arr) => arr.iter().find_map(find_page_info_like),
        _ => None,
    }
}
