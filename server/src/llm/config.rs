//! Chatbot provider configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_GROQ_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_HF_MODEL: &str = "microsoft/DialoGPT-medium";
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Keys and models for the provider cascade. Either provider may be absent;
/// the client uses whichever is configured, Groq first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub hf_api_token: Option<String>,
    pub hf_model: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed chatbot config from environment variables.
    ///
    /// Optional:
    /// - `GROQ_API_KEY` (must start with `gsk_` to be considered configured)
    /// - `GROQ_MODEL`: default `mixtral-8x7b-32768`
    /// - `HUGGINGFACEHUB_API_TOKEN` (must start with `hf_`)
    /// - `HF_MODEL`: default `microsoft/DialoGPT-medium`
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 60
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] when neither provider key is set.
    pub fn from_env() -> Result<Self, LlmError> {
        let groq_api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| is_valid_groq_key(k));
        let hf_api_token = std::env::var("HUGGINGFACEHUB_API_TOKEN")
            .ok()
            .filter(|k| is_valid_hf_token(k));

        if groq_api_key.is_none() && hf_api_token.is_none() {
            return Err(LlmError::MissingApiKey {
                var: "GROQ_API_KEY or HUGGINGFACEHUB_API_TOKEN".into(),
            });
        }

        Ok(Self {
            groq_api_key,
            groq_model: std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_owned()),
            hf_api_token,
            hf_model: std::env::var("HF_MODEL").unwrap_or_else(|_| DEFAULT_HF_MODEL.to_owned()),
            timeouts: LlmTimeouts {
                request_secs: env_parse_u64("LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse_u64("LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
            },
        })
    }
}

/// Placeholder values from sample env files must not count as configured.
pub(crate) fn is_valid_groq_key(key: &str) -> bool {
    key.starts_with("gsk_")
}

pub(crate) fn is_valid_hf_token(token: &str) -> bool {
    token.starts_with("hf_")
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
