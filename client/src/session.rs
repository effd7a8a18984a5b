//! Session lifecycle — the single source of truth for "am I logged in".
//!
//! DESIGN
//! ======
//! A [`Session`] is an explicit injectable object (constructed once at app
//! start with its API client and store) rather than ambient global state.
//! It runs the state machine `Unknown -> Checking -> Authenticated |
//! Anonymous` and never performs navigation; adapters observe the state and
//! route accordingly.
//!
//! Verification is fail-closed: any indeterminate check (network down,
//! rejected token, malformed response) lands in `Anonymous` with the stored
//! token cleared, never in a half-authenticated state.
//!
//! A generation counter guards against the stale-response race: a
//! `check_auth` that resolves after `logout` already cleared the session
//! must not resurrect it.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api::{ApiError, AuthApi, User};
use crate::store::{SessionStore, TOKEN_KEY, USER_KEY};

/// Authentication lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Before the first check has started.
    Unknown,
    /// The initial stored-token validation is in flight.
    Checking,
    Authenticated,
    Anonymous,
}

/// Snapshot of session state handed to adapters and guards.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<User>,
    pub token: Option<String>,
    /// True while a login/register call is in flight; drives the submit
    /// button's disabled state so overlapping calls cannot start.
    pub busy: bool,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// True until the initial check resolves. Guards render a placeholder
    /// while this holds.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Unknown | SessionPhase::Checking)
    }
}

/// Session context: owns current auth state and the operations mutating it.
pub struct Session {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    state: Mutex<SessionState>,
    generation: AtomicU64,
}

impl Session {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            state: Mutex::new(SessionState {
                phase: SessionPhase::Unknown,
                user: None,
                token: None,
                busy: false,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Validate any stored token against the profile endpoint.
    ///
    /// Never fails: every error path resolves to `false` with the session
    /// cleared. Returns `true` only when the backend confirmed the token.
    pub async fn check_auth(&self) -> bool {
        let generation = self.generation.load(Ordering::SeqCst);

        {
            let mut state = self.lock();
            if matches!(state.phase, SessionPhase::Unknown) {
                state.phase = SessionPhase::Checking;
            }
        }

        let Some(token) = self.store.get(TOKEN_KEY) else {
            self.settle_anonymous(generation, false);
            return false;
        };

        match self.api.fetch_profile(&token).await {
            Ok(user) => {
                if self.is_stale(generation) {
                    return false;
                }
                self.cache_user(&user);
                let mut state = self.lock();
                state.phase = SessionPhase::Authenticated;
                state.user = Some(user);
                state.token = Some(token);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "authentication check failed");
                self.settle_anonymous(generation, true);
                false
            }
        }
    }

    /// Authenticate and establish a session.
    ///
    /// On success the token is persisted, the profile fetched and cached,
    /// and the state becomes `Authenticated`; the caller then navigates to
    /// the landing page. On failure the classified error propagates and the
    /// previous session state is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] so the login page can distinguish rejected
    /// credentials from an unreachable or failing server.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.set_busy(true);

        let login = match self.api.login(email, password).await {
            Ok(login) => login,
            Err(e) => {
                self.set_busy(false);
                return Err(e);
            }
        };

        // Token first, then profile: the profile fetch authenticates with
        // the token just received.
        self.store.set(TOKEN_KEY, &login.token);
        match self.api.fetch_profile(&login.token).await {
            Ok(user) => {
                self.cache_user(&user);
                self.generation.fetch_add(1, Ordering::SeqCst);
                let mut state = self.lock();
                state.phase = SessionPhase::Authenticated;
                state.user = Some(user);
                state.token = Some(login.token);
                state.busy = false;
                Ok(())
            }
            Err(e) => {
                // Roll the token back so a failed login leaves no session.
                self.store.remove(TOKEN_KEY);
                self.set_busy(false);
                Err(e)
            }
        }
    }

    /// Create an account. Does not authenticate; the caller navigates to
    /// the login page on success.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] exactly like [`Session::login`].
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        self.set_busy(true);
        let result = self.api.register(username, email, password).await;
        self.set_busy(false);
        result
    }

    /// Clear the session synchronously. No network call, idempotent; the
    /// caller navigates to the public landing page.
    pub fn logout(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        state.phase = SessionPhase::Anonymous;
        state.user = None;
        state.token = None;
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    fn set_busy(&self, busy: bool) {
        self.lock().busy = busy;
    }

    fn cache_user(&self, user: &User) {
        if let Ok(json) = serde_json::to_string(user) {
            self.store.set(USER_KEY, &json);
        }
    }

    /// Resolve a check as anonymous, clearing the stored slots when the
    /// failure came from a rejected or unreachable validation.
    fn settle_anonymous(&self, generation: u64, clear_store: bool) {
        if self.is_stale(generation) {
            return;
        }
        if clear_store {
            self.store.remove(TOKEN_KEY);
            self.store.remove(USER_KEY);
        }
        let mut state = self.lock();
        state.phase = SessionPhase::Anonymous;
        state.user = None;
        state.token = None;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
