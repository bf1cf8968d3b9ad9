use fbfeed_rs::FbError;
use fbfeed_rs::decode::{DecodeMode, decode};
use serde_json::json;

#[test]
fn single_object_parses_only_the_first_line() {
    let raw = "for (;;);{\"data\":{\"node\":{\"id\":\"a\"}}}\n{\"data\":{\"node\":{\"id\":\"b\"}}}";
    let blocks = decode(raw, DecodeMode::SingleObject).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["data"]["node"]["id"], json!("a"));
}

#[test]
fn single_object_malformed_is_a_json_error() {
    let err = decode("for (;;);{\"data\": {", DecodeMode::SingleObject).unwrap_err();
    assert!(matches!(err, FbError::Json(_)), "got {err:?}");
}

#[test]
fn single_object_non_object_yields_no_blocks() {
    assert!(decode("[1,2,3]", DecodeMode::SingleObject).unwrap().is_empty());
    assert!(decode("for (;;);", DecodeMode::SingleObject).unwrap().is_empty());
}
