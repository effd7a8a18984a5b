//! Hugging Face inference API client.
//!
//! The free inference endpoint takes a single flattened prompt rather than a
//! role-tagged message list, so the conversation is rendered to text before
//! sending. Pure parsing in `parse_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmTimeouts;
use super::types::{ChatResponse, LlmError, Message};

const API_BASE: &str = "https://api-inference.huggingface.co/models";
const MAX_NEW_TOKENS: u32 = 250;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HuggingFaceClient {
    http: reqwest::Client,
    api_token: String,
}

impl HuggingFaceClient {
    pub fn new(api_token: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_token })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let inputs = flatten_prompt(system, messages);
        let body = ApiRequest {
            inputs: &inputs,
            parameters: Parameters {
                max_new_tokens: max_tokens.min(MAX_NEW_TOKENS),
                temperature: 0.7,
                return_full_text: false,
            },
        };

        let url = format!("{API_BASE}/{model}");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text, model)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
}

// =============================================================================
// HELPERS / PARSING
// =============================================================================

/// Render system prompt and conversation into a single text prompt.
fn flatten_prompt(system: &str, messages: &[Message]) -> String {
    let mut prompt = String::with_capacity(system.len() + 64);
    prompt.push_str(system);
    for m in messages {
        prompt.push_str("\n\n");
        prompt.push_str(&m.role);
        prompt.push_str(": ");
        prompt.push_str(&m.content);
    }
    prompt.push_str("\n\nassistant:");
    prompt
}

fn parse_response(json: &str, model: &str) -> Result<ChatResponse, LlmError> {
    let generations: Vec<Generation> =
        serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text = generations
        .into_iter()
        .next()
        .and_then(|g| g.generated_text)
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(LlmError::EmptyCompletion);
    }

    Ok(ChatResponse { text: text.trim().to_owned(), model: model.to_owned() })
}

#[cfg(test)]
#[path = "huggingface_test.rs"]
mod tests;
