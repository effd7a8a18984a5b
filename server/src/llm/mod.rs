//! LLM — provider cascade for the travel chatbot.
//!
//! DESIGN
//! ======
//! The chatbot forwards to whichever inference API is configured: Groq's
//! OpenAI-compatible endpoint first (faster, more reliable), then the
//! Hugging Face inference API. A provider failure falls through to the next
//! one; only when every configured provider has failed does the error reach
//! the route, which then serves its canned offline reply.

pub mod config;
pub mod groq;
pub mod huggingface;
pub mod types;

use config::LlmConfig;
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message};

// =============================================================================
// CLIENT CASCADE
// =============================================================================

/// Concrete LLM client dispatching across the configured providers.
pub struct LlmClient {
    groq: Option<(groq::GroqClient, String)>,
    hf: Option<(huggingface::HuggingFaceClient, String)>,
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if neither provider key is configured or an HTTP
    /// client fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let groq = config
            .groq_api_key
            .map(|key| groq::GroqClient::new(key, config.timeouts).map(|c| (c, config.groq_model.clone())))
            .transpose()?;
        let hf = config
            .hf_api_token
            .map(|token| {
                huggingface::HuggingFaceClient::new(token, config.timeouts).map(|c| (c, config.hf_model.clone()))
            })
            .transpose()?;
        Ok(Self { groq, hf })
    }

    /// Comma-separated list of configured provider models, for startup logs.
    #[must_use]
    pub fn models(&self) -> String {
        let mut names = Vec::new();
        if let Some((_, model)) = &self.groq {
            names.push(format!("groq:{model}"));
        }
        if let Some((_, model)) = &self.hf {
            names.push(format!("huggingface:{model}"));
        }
        names.join(",")
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        let mut last_err = LlmError::MissingApiKey { var: "GROQ_API_KEY or HUGGINGFACEHUB_API_TOKEN".into() };

        if let Some((client, model)) = &self.groq {
            match client.chat(model, max_tokens, system, messages).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    tracing::warn!(error = %e, "groq request failed, trying fallback");
                    last_err = e;
                }
            }
        }

        if let Some((client, model)) = &self.hf {
            match client.chat(model, max_tokens, system, messages).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    tracing::warn!(error = %e, "hugging face request failed");
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }
}
