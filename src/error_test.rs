use super::*;

fn json_error() -> serde_json::Error {
    serde_json::from_str::<i32>("notjson").unwrap_err()
}

#[test]
fn decode_error_names_parameter() {
    let err = QueryStateError::Decode {
        param: "count".to_owned(),
        source: json_error(),
    };
    assert!(err.to_string().starts_with("failed to decode query parameter `count`: "));
    assert_eq!(err.param(), Some("count"));
}

#[test]
fn decode_error_exposes_json_source() {
    use std::error::Error as _;

    let err = QueryStateError::Decode {
        param: "count".to_owned(),
        source: json_error(),
    };
    assert!(err.source().is_some());
}

#[test]
fn parse_error_quotes_value() {
    let err = QueryStateError::Parse {
        param: "page".to_owned(),
        value: "abc".to_owned(),
        message: "invalid digit found in string".to_owned(),
    };
    assert_eq!(
        err.to_string(),
        "invalid value \"abc\" for query parameter `page`: invalid digit found in string"
    );
}

#[test]
fn browser_error_has_no_parameter() {
    let err = QueryStateError::Browser("SecurityError".to_owned());
    assert_eq!(err.to_string(), "browser api error: SecurityError");
    assert_eq!(err.param(), None);
}
