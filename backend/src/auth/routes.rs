//! Defines the HTTP route for authentication.
//!
//! Designed to be merged into the main Axum router.

use crate::auth::handlers::login;
use axum::{Router, routing::post};

/// Creates the authentication router
pub fn auth_router() -> Router {
    Router::new().route("/auth", post(login))
}
