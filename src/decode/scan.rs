use serde_json::Value;

const DATA_KEY: &str = "\"data\"";

/// Index of the `}` closing the object that opens at `start`.
///
/// Braces inside string literals (including escaped quotes) are ignored, so
/// post texts containing `{` or `}` do not unbalance the scan.
pub(crate) fn find_matching_brace(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(start).copied()? != b'{' {
        return None;
    }

    let mut depth = 0usize;
    let mut in_str = false;
    let mut j = start;

    while j < bytes.len() {
        let c = bytes[j];

        if in_str {
            if c == b'\\' {
                j += 2;
                continue;
            } else if c == b'"' {
                in_str = false;
            }
            j += 1;
            continue;
        }

        match c {
            b'"' => in_str = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// Start of the object value bound to the key ending at `after_key`, if the
/// key is followed by `:` and an object. `"data":null`, string values that
/// merely read `"data"` and the like yield `None`.
fn object_value_start(text: &str, after_key: usize) -> Option<usize> {
    let rest = &text[after_key..];
    let after_colon = rest.trim_start().strip_prefix(':')?;
    let value = after_colon.trim_start();
    value
        .starts_with('{')
        .then(|| text.len() - value.len())
}

/// Every balanced object bound to a `"data"` key, in order of appearance.
///
/// Keys whose value is not an object (an error body's `"data":null`) are
/// passed over. Candidates that do not parse are skipped. An unclosed
/// candidate (truncated body) does not end the scan: it resumes right after
/// that key so complete objects nested inside the fragment are still recovered.
pub(crate) fn scan_data_objects(text: &str) -> Vec<Value> {
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(rel) = text[pos..].find(DATA_KEY) {
        let key_at = pos + rel;
        let after_key = key_at + DATA_KEY.len();

        let Some(obj_start) = object_value_start(text, after_key) else {
            pos = after_key;
            continue;
        };

        match find_matching_brace(text, obj_start) {
            Some(obj_end) => {
                let candidate = &text[obj_start..=obj_end];
                match serde_json::from_str::<Value>(candidate) {
                    Ok(v) => out.push(v),
                    Err(e) => {
                        tracing::debug!(at = obj_start, error = %e, "skipping unparsable data candidate");
                    }
                }
                pos = obj_end + 1;
            }
            None => {
                tracing::debug!(at = obj_start, "unbalanced data candidate");
                pos = after_key;
            }
        }
    }

    out
}
