//! Module for account registration API endpoints.
//!
//! This module handles creating new accounts from a submitted identifier,
//! email address, and password.

pub mod handlers;
pub mod routes;
