use super::*;

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parse_response_extracts_first_choice() {
    let json = r#"{
        "model": "mixtral-8x7b-32768",
        "choices": [{"message": {"role": "assistant", "content": "Visit Porto."}}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 4}
    }"#;
    let resp = parse_response(json).unwrap();
    assert_eq!(resp.text, "Visit Porto.");
    assert_eq!(resp.model, "mixtral-8x7b-32768");
}

#[test]
fn parse_response_rejects_empty_choices() {
    let json = r#"{"model": "m", "choices": []}"#;
    assert!(matches!(parse_response(json), Err(LlmError::EmptyCompletion)));
}

#[test]
fn parse_response_rejects_null_content() {
    let json = r#"{"model": "m", "choices": [{"message": {"content": null}}]}"#;
    assert!(matches!(parse_response(json), Err(LlmError::EmptyCompletion)));
}

#[test]
fn parse_response_rejects_whitespace_only_content() {
    let json = r#"{"model": "m", "choices": [{"message": {"content": "   "}}]}"#;
    assert!(matches!(parse_response(json), Err(LlmError::EmptyCompletion)));
}

#[test]
fn parse_response_rejects_malformed_json() {
    assert!(matches!(parse_response("not json"), Err(LlmError::ApiParse(_))));
}

// =============================================================================
// build_messages
// =============================================================================

#[test]
fn build_messages_prepends_system() {
    let history = [Message::user("hi"), Message::assistant("hello")];
    let msgs = build_messages("you are a travel bot", &history);
    assert_eq!(msgs.len(), 3);
    assert_eq!(msgs[0].role, "system");
    assert_eq!(msgs[0].content, "you are a travel bot");
    assert_eq!(msgs[1].role, "user");
    assert_eq!(msgs[2].role, "assistant");
}

#[test]
fn request_serializes_to_openai_shape() {
    let msgs = build_messages("sys", &[Message::user("q")]);
    let body = ApiRequest { model: "mixtral-8x7b-32768", max_tokens: 1000, messages: &msgs, temperature: 0.7 };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["model"], "mixtral-8x7b-32768");
    assert_eq!(json["max_tokens"], 1000);
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["content"], "q");
}
