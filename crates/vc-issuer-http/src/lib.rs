//! VC issuer HTTP server functionality.
//!
//! Validates requests, delegates to the domain services held in [`state::AppState`] and maps
//! their results onto a small set of HTTP outcomes.
pub mod agent;
pub mod claims;
pub mod config;
pub mod credential;
#[cfg(test)]
pub(crate) mod data;
pub mod errors;
pub mod health;
pub mod identity;
#[cfg(test)]
pub(crate) mod mocks;
pub mod publish;
pub mod revocation;
pub mod server;
pub mod state;
pub mod static_handlers;
pub mod validation;
