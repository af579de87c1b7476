//! Credential issuance for the auth service.
//!
//! Validates signup fields, stores accounts in SQLite, authenticates logins,
//! and signs seven day RS256 session tokens. The binary in `main.rs` wires
//! these modules into an Axum server.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;
