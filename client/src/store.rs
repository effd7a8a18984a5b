//! Persistent key-value slots for session data.
//!
//! The web adapter backs this with browser local storage; tests and native
//! adapters use [`MemoryStore`]. Two conventional slots hold the session:
//! [`TOKEN_KEY`] for the bearer token and [`USER_KEY`] for the cached
//! JSON-serialized profile.

use std::collections::HashMap;
use std::sync::Mutex;

/// Slot holding the current bearer token.
pub const TOKEN_KEY: &str = "token";
/// Slot holding the cached JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// String-slot storage shared by session and game state.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store, one instance per logical browser tab.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
