use std::collections::BTreeMap;

use serde::Deserialize;

use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Filter {
    tags: Vec<String>,
    min: i32,
}

fn encode<T: Serialize + DeserializeOwned>(value: &T) -> Option<String> {
    JsonCodec.encode("p", value).expect("encode")
}

// =============================================================
// JsonCodec emptiness policy
// =============================================================

#[test]
fn json_null_and_empty_string_remove_parameter() {
    assert_eq!(encode(&None::<i32>), None);
    assert_eq!(encode(&()), None);
    assert_eq!(encode(&String::new()), None);
    assert_eq!(encode(&serde_json::Value::Null), None);
}

#[test]
fn json_falsy_values_are_still_written() {
    assert_eq!(encode(&0), Some("0".to_owned()));
    assert_eq!(encode(&false), Some("false".to_owned()));
    assert_eq!(encode(&Vec::<i32>::new()), Some("[]".to_owned()));
    assert_eq!(encode(&BTreeMap::<String, i32>::new()), Some("{}".to_owned()));
}

#[test]
fn json_whitespace_string_is_not_empty() {
    assert_eq!(encode(&" ".to_owned()), Some("\" \"".to_owned()));
}

#[test]
fn json_non_finite_floats_are_written_as_null() {
    assert_eq!(encode(&f64::NAN), Some("null".to_owned()));
    assert_eq!(encode(&f64::INFINITY), Some("null".to_owned()));
    assert_eq!(encode(&Some(f64::NEG_INFINITY)), Some("null".to_owned()));
}

#[test]
fn json_struct_holding_empty_string_is_written() {
    #[derive(Serialize, Deserialize)]
    struct Search {
        q: String,
    }
    assert_eq!(encode(&Search { q: String::new() }), Some(r#"{"q":""}"#.to_owned()));
}

#[test]
fn json_some_value_writes_inner_value() {
    assert_eq!(encode(&Some(5)), Some("5".to_owned()));
    assert_eq!(encode(&Some(String::new())), None);
}

#[test]
fn json_strings_are_quoted() {
    assert_eq!(encode(&"chat".to_owned()), Some("\"chat\"".to_owned()));
}

#[test]
fn json_structs_round_trip() {
    let filter = Filter {
        tags: vec!["a".to_owned(), "b c".to_owned()],
        min: -3,
    };
    let text = encode(&filter).expect("non-empty");
    assert_eq!(text, r#"{"tags":["a","b c"],"min":-3}"#);
    let back: Filter = JsonCodec.decode("p", &text).expect("decode");
    assert_eq!(back, filter);
}

#[test]
fn json_text_matches_serde_json_field_order() {
    let filter = Filter {
        tags: vec!["z".to_owned()],
        min: 4,
    };
    let expected = serde_json::to_string(&filter).expect("to_string");
    assert_eq!(encode(&filter), Some(expected));
}

#[test]
fn json_non_string_map_keys_fail_to_encode() {
    let mut map = BTreeMap::new();
    map.insert((1, 2), "x".to_owned());
    let err = JsonCodec.encode("p", &map).unwrap_err();
    assert!(matches!(err, QueryStateError::Encode { ref param, .. } if param == "p"));
}

#[test]
fn json_invalid_text_fails_to_decode() {
    let err = <JsonCodec as ParamCodec<i32>>::decode(&JsonCodec, "count", "notjson").unwrap_err();
    assert!(matches!(err, QueryStateError::Decode { .. }));
    assert_eq!(err.param(), Some("count"));
}

#[test]
fn json_type_mismatch_fails_to_decode() {
    let err = <JsonCodec as ParamCodec<i32>>::decode(&JsonCodec, "count", "\"five\"").unwrap_err();
    assert!(matches!(err, QueryStateError::Decode { .. }));
}

// =============================================================
// PlainCodec
// =============================================================

#[test]
fn plain_writes_display_text() {
    let codec = PlainCodec::<String>::new();
    assert_eq!(
        codec.encode("tab", &"chat".to_owned()).expect("encode"),
        Some("chat".to_owned())
    );
}

#[test]
fn plain_empty_text_removes_parameter() {
    let codec = PlainCodec::<String>::new();
    assert_eq!(codec.encode("tab", &String::new()).expect("encode"), None);
}

#[test]
fn plain_parses_numbers() {
    let codec = PlainCodec::<u32>::new();
    assert_eq!(codec.decode("page", "12").expect("decode"), 12);
    assert_eq!(codec.encode("page", &0).expect("encode"), Some("0".to_owned()));
}

#[test]
fn plain_parse_failure_reports_value() {
    let codec = PlainCodec::<u32>::new();
    let err = codec.decode("page", "abc").unwrap_err();
    match err {
        QueryStateError::Parse { param, value, .. } => {
            assert_eq!(param, "page");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}
