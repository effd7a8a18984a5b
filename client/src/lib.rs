//! Client-side session and state library for the travel platform.
//!
//! SYSTEM CONTEXT
//! ==============
//! UI adapters (web, native, tests) consume this crate instead of talking to
//! the API directly. Everything here is framework-free: state machines and
//! API clients with injected dependencies, no rendering and no navigation.
//! An adapter observes state transitions and performs navigation itself.

pub mod api;
pub mod game;
pub mod guard;
pub mod session;
pub mod store;

pub use api::{ApiError, AuthApi, HttpAuthApi, User};
pub use guard::GuardDecision;
pub use session::{Session, SessionPhase, SessionState};
pub use store::{MemoryStore, SessionStore};
