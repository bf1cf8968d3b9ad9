use fbfeed_rs::decode::{DecodeMode, decode, decode_clean, strip_prefix};
use serde_json::{Value, json};

#[test]
fn scan_recovers_each_data_payload_through_noise() {
    let a = json!({ "node": { "post_id": "1" } });
    let b = json!({ "page_info": { "has_next_page": true, "end_cursor": "x" } });
    let c = json!({ "node": { "post_id": "3", "message": { "text": "curly } brace { text" } } });
    let raw = format!(
        "for (;;);{{\"label\":\"first\",\"data\":{a}}}\n<garbage line>\n\
         {{\"data\":{b},\"extensions\":{{}}}} trailing junk {{\"data\":{c}}}"
    );

    let blocks = decode(&raw, DecodeMode::Scan).unwrap();
    let got: Vec<Value> = blocks.into_iter().map(Value::Object).collect();
    assert_eq!(got, vec![a, b, c]);
}

#[test]
fn scan_skips_unparsable_and_truncated_candidates() {
    let raw = r#"for (;;);{"data":{"broken": tru}} {"data":{"ok":1}} {"data":{"cut": {"#;
    let blocks = decode(raw, DecodeMode::Scan).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].get("ok"), Some(&json!(1)));
}

#[test]
fn scan_without_data_keys_is_empty_not_an_error() {
    let blocks = decode("for (;;);{\"error\":1357001}", DecodeMode::Scan).unwrap();
    assert!(blocks.is_empty());
    assert!(decode("", DecodeMode::Scan).unwrap().is_empty());
}

#[test]
fn scan_passes_over_null_data_of_error_bodies() {
    let raw = r#"for (;;);{"data":null,"errors":[{"message":"Rate limit exceeded","code":1675004}]}"#;
    assert!(decode_clean(raw, DecodeMode::Scan).unwrap().is_empty());

    let mixed = r#"{"data":null,"errors":[{"code":1}]} {"kind":"data","data" : {"ok":2}}"#;
    let blocks = decode_clean(mixed, DecodeMode::Scan).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].get("ok"), Some(&json!(2)));
}

#[test]
fn scan_ignores_escaped_quotes_inside_strings() {
    let raw = r#"{"data":{"text":"she said \"}\" twice","n":2}}"#;
    let blocks = decode(raw, DecodeMode::Scan).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].get("n"), Some(&json!(2)));
}

#[test]
fn strip_prefix_only_touches_the_prefix() {
    assert_eq!(strip_prefix("for (;;);{\"a\":1}"), "{\"a\":1}");
    assert_eq!(strip_prefix("  for (;;);\n{}"), "{}");
    assert_eq!(strip_prefix("{\"for (;;);\":1}"), "{\"for (;;);\":1}");
}
