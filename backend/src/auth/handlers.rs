//! Handler functions for the login endpoint.
//!
//! The handler checks the body's field set, runs the login through
//! `AccountService`, and returns the signed token in the `jwt` header and
//! the response body.

use crate::api::common::{ApiResponse, json_payload, service_error_to_http};
use crate::auth::models::{LoginRequest, LoginResponse};
use crate::auth::state::AuthState;
use crate::repositories::account_repository::AccountRepository;
use crate::services::account_service::AccountService;
use crate::utils::jwt::TOKEN_LIFETIME_DAYS;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::{HeaderName, StatusCode},
    response::IntoResponse,
};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Response header carrying the issued token.
pub const TOKEN_HEADER: HeaderName = HeaderName::from_static("jwt");

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(state): Extension<Arc<AuthState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let body = json_payload(payload)?;
    let request = LoginRequest::try_from(body).map_err(service_error_to_http)?;

    let service = AccountService::new(
        AccountRepository::new(&pool),
        &state.issuer,
        state.bcrypt_cost,
    );

    let token = service
        .login(&request.user_id, &request.password)
        .await
        .map_err(service_error_to_http)?;

    let response = LoginResponse {
        token: token.clone(),
        expires_in: (TOKEN_LIFETIME_DAYS * 24 * 60 * 60) as u64,
    };

    Ok((
        [(TOKEN_HEADER, token)],
        Json(ApiResponse::success(response, "Login successful")),
    ))
}
