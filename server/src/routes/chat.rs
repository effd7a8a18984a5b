//! Chatbot route — forwards travel questions to the LLM provider cascade.
//!
//! DESIGN
//! ======
//! The route always answers 200 with a `response` body, even when every
//! provider fails: the frontend renders whatever text comes back, so a
//! canned offline reply beats an error page. `model_used` tells the UI
//! (and the logs) which path produced the answer.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::auth::MaybeAuthUser;
use crate::llm::types::Message;
use crate::state::AppState;

const MAX_RESPONSE_TOKENS: u32 = 1000;

/// The assistant's fixed persona and mandatory crisis-alert formatting.
const TRAVEL_SYSTEM_PROMPT: &str = "You are a travel assistant chatbot named Yatra Sevak.AI designed to help users plan their trips and provide travel-related information.\n\nIMPORTANT: For any destination mentioned, ALWAYS include a \"CRISIS ALERT\" section in your response with information about any recent disasters, floods, attacks, political unrest, health emergencies, or other crisis situations that might affect travel safety. If there are no current crisis situations, explicitly state \"No current crisis situations reported in this area.\"\n\nFormat the crisis information as follows:\n\u{26a0}\u{fe0f} CRISIS ALERT \u{26a0}\u{fe0f}\n[List any current crisis situations with brief details about severity, affected areas, and safety recommendations]\n\nThis crisis information should appear at the beginning of your response, before other travel information.\n\nYou can help with:\n1. Booking Flights and Hotels\n2. Booking Rental Cars\n3. Destination Information and Travel Tips\n4. Weather Updates and Local Attractions\n5. Customer Service and Travel Support\n\nPlease ensure responses are informative, accurate, and tailored to the user's queries and preferences.";

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub chat_history: Vec<HistoryEntry>,
}

#[derive(Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub sender: String,
}

/// `POST /api/chatbot` — optionally authenticated chat turn.
pub async fn chatbot(
    State(state): State<AppState>,
    MaybeAuthUser(auth): MaybeAuthUser,
    Json(body): Json<ChatRequest>,
) -> Response {
    if body.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message is required" })),
        )
            .into_response();
    }

    // Anonymous visitors share one rate-limit bucket.
    let client_id = auth.as_ref().map_or(Uuid::nil(), |a| a.claims.user_id);
    if let Err(e) = state.rate_limiter.check_and_record(client_id) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    let messages = build_messages(&body.chat_history, &body.message);

    let (response_text, model_used) = match &state.llm {
        Some(llm) => match llm
            .chat(MAX_RESPONSE_TOKENS, TRAVEL_SYSTEM_PROMPT, &messages)
            .await
        {
            Ok(resp) => (resp.text.trim().to_owned(), resp.model),
            Err(e) => {
                tracing::warn!(error = %e, "all chat providers failed, serving fallback");
                (contextual_fallback(&body.message), "fallback-contextual".to_owned())
            }
        },
        None => (contextual_fallback(&body.message), "fallback-contextual".to_owned()),
    };

    let user = auth.map(|a| json!({ "id": a.claims.user_id, "username": a.claims.username }));

    Json(json!({
        "success": true,
        "response": response_text,
        "timestamp": now_unix_millis(),
        "model_used": model_used,
        "user": user,
    }))
    .into_response()
}

/// Convert the wire chat history plus the new question into provider messages.
fn build_messages(history: &[HistoryEntry], message: &str) -> Vec<Message> {
    let mut messages: Vec<Message> = history
        .iter()
        .map(|entry| {
            if entry.sender == "ai" {
                Message::assistant(entry.text.clone())
            } else {
                Message::user(entry.text.clone())
            }
        })
        .collect();
    messages.push(Message::user(message));
    messages
}

/// Offline reply keyed on the user's question, served when no provider is
/// configured or every provider failed.
fn contextual_fallback(message: &str) -> String {
    let lower = message.to_lowercase();
    let greeting = if lower.contains("hello") || lower.contains("hi ") || lower.starts_with("hi") {
        "Hello! Welcome to Yatra Sevak.AI!"
    } else if lower.contains("plan") || lower.contains("trip") || lower.contains("travel") {
        "I'd love to help you plan your trip!"
    } else if lower.contains("hotel") || lower.contains("accommodation") {
        "I can help you find great accommodation options!"
    } else if lower.contains("flight") || lower.contains("airline") {
        "Let me assist you with flight information!"
    } else {
        "Thanks for your travel question!"
    };

    format!(
        "{greeting}\n\n\u{26a0}\u{fe0f} CRISIS ALERT \u{26a0}\u{fe0f}\nNo current crisis situations reported for general travel inquiries.\n\nI'm currently running in offline mode as AI providers are unavailable. I can still help you with flight booking guidance, hotel recommendations, itinerary planning, local attractions, weather, and travel safety tips once service is restored.\n\nHow can I assist you with your travel plans today?"
    )
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
