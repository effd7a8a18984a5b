//! Service layer — storage access and outbound API clients.

pub mod auth;
pub mod review;
pub mod token;
pub mod travel;
pub mod user;
