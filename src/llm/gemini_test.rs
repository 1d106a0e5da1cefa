use super::*;

#[test]
fn parse_response_extracts_candidate_text() {
    let body = r#"{
        "candidates": [
            { "content": { "parts": [ { "text": "[{\"dayNumber\":1}]" } ], "role": "model" } }
        ],
        "modelVersion": "gemini-2.5-flash"
    }"#;

    let text = parse_response(body).unwrap();
    assert_eq!(text, r#"[{"dayNumber":1}]"#);
}

#[test]
fn parse_response_concatenates_multiple_parts() {
    let body = r#"{
        "candidates": [
            { "content": { "parts": [ { "text": "{\"a\":" }, { "text": "1}" } ] } }
        ]
    }"#;

    assert_eq!(parse_response(body).unwrap(), r#"{"a":1}"#);
}

#[test]
fn parse_response_without_candidates_errors() {
    let err = parse_response(r#"{"candidates": []}"#).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_response_with_empty_parts_errors() {
    let body = r#"{"candidates": [ { "content": { "parts": [] } } ]}"#;
    assert!(matches!(parse_response(body).unwrap_err(), LlmError::ApiParse(_)));
}

#[test]
fn parse_response_rejects_non_json_body() {
    assert!(matches!(parse_response("<html>503</html>").unwrap_err(), LlmError::ApiParse(_)));
}

#[test]
fn client_builds_from_config() {
    let config = GeminiConfig {
        api_key: "secret".into(),
        model: "gemini-2.5-flash".into(),
        base_url: "https://example.test/v1beta".into(),
        timeouts: super::super::config::GeminiTimeouts { request_secs: 5, connect_secs: 2 },
    };
    let client = GeminiClient::new(config).unwrap();
    assert_eq!(client.model(), "gemini-2.5-flash");
}
