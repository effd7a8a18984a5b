//! REST API client for the auth endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Failures are classified three ways and the distinction is load-bearing
//! for the UI: [`ApiError::Network`] (server unreachable — the login page
//! offers its demo/offline mode), [`ApiError::Server`] (5xx — "try again
//! later", an existing session is kept), and [`ApiError::Rejected`] (4xx —
//! the server's own `message` is shown inline, e.g. "Invalid credentials").

use serde::{Deserialize, Serialize};

/// Profile as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginSuccess {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server could not be reached at all.
    #[error("cannot reach server: {0}")]
    Network(String),
    /// The server answered with a 5xx.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// The server rejected the request (4xx) with a user-facing message.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// A success response whose body did not match the contract.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the failure means the backend is unreachable, which is the
    /// trigger for the UI's offline/demo fallback.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Auth endpoint operations. A trait so session logic can be driven by a
/// mock in tests.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /api/auth/login`.
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, ApiError>;

    /// `POST /api/auth/register`. Success is an acknowledgment; the caller
    /// is expected to log in afterwards.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError>;

    /// `GET /api/profile` with a bearer token.
    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError>;
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    user: User,
}

#[derive(Deserialize, Default)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
}

impl HttpAuthApi {
    /// Build a client for the given backend origin, e.g.
    /// `http://localhost:5000`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { http, base_url: normalize_base_url(base_url.into()) })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn classify_failure(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let envelope: ErrorEnvelope = response.json().await.unwrap_or_default();
        classify(status, envelope.message)
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginSuccess, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginBody { email, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }
        response
            .json::<LoginSuccess>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&RegisterBody { username, email, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }
        Ok(())
    }

    async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .http
            .get(self.url("/api/profile"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }
        response
            .json::<ProfileEnvelope>()
            .await
            .map(|envelope| envelope.user)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Map a non-success status plus optional server message onto the error
/// taxonomy.
pub(crate) fn classify(status: u16, message: Option<String>) -> ApiError {
    let message = message.unwrap_or_else(|| "Request failed".to_owned());
    if status >= 500 {
        ApiError::Server { status, message }
    } else {
        ApiError::Rejected { status, message }
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
