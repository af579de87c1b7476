//! Authentication module for logging in and issuing tokens.
//!
//! This module provides the login endpoint, its payloads, and the shared
//! state (token issuer, hashing cost) the handlers run with.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
