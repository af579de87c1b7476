//! Central module for organizing the application's API endpoints.
//!
//! Account registration lives under `user`; the login route comes from the
//! `auth` module. [`router`] merges both with the shared state layers.

pub mod common;
pub mod user;

#[cfg(test)]
mod tests;

use crate::api::common::ApiResponse;
use crate::auth::state::AuthState;
use axum::{Extension, Router, response::Json, routing::get};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Assembles the application router with its shared state.
pub fn router(pool: SqlitePool, state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(user::routes::user_router())
        .merge(crate::auth::routes::auth_router())
        .layer(Extension(pool))
        .layer(Extension(state))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Auth Service",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the auth service",
    ))
}
