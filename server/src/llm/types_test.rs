use super::*;

#[test]
fn message_constructors_set_roles() {
    assert_eq!(Message::user("hi").role, "user");
    assert_eq!(Message::assistant("hello").role, "assistant");
}

#[test]
fn message_serializes_to_wire_shape() {
    let json = serde_json::to_value(Message::user("plan a trip")).unwrap();
    assert_eq!(json["role"], "user");
    assert_eq!(json["content"], "plan a trip");
}

#[test]
fn chat_response_round_trips() {
    let resp = ChatResponse { text: "pack light".into(), model: "mixtral-8x7b-32768".into() };
    let json = serde_json::to_string(&resp).unwrap();
    let restored: ChatResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.text, "pack light");
    assert_eq!(restored.model, "mixtral-8x7b-32768");
}

#[test]
fn missing_api_key_error_names_the_var() {
    let err = LlmError::MissingApiKey { var: "GROQ_API_KEY".into() };
    assert!(err.to_string().contains("GROQ_API_KEY"));
}

#[test]
fn api_response_error_carries_status() {
    let err = LlmError::ApiResponse { status: 503, body: "overloaded".into() };
    assert!(err.to_string().contains("503"));
}
