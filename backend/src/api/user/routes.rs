//! Defines the HTTP route for account registration.

use super::handlers::create_user;
use axum::{Router, routing::post};

pub fn user_router() -> Router {
    Router::new().route("/user", post(create_user))
}
