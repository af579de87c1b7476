//! Handler functions for account registration.
//!
//! These functions check the request body's field set, hand the values to
//! `AccountService`, and report `201 Created` on success.

use crate::api::common::{ApiResponse, json_payload, service_error_to_http};
use crate::auth::models::{SignUpRequest, SignUpResponse};
use crate::auth::state::AuthState;
use crate::repositories::account_repository::AccountRepository;
use crate::services::account_service::AccountService;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Creates a new account.
#[axum::debug_handler]
pub async fn create_user(
    Extension(pool): Extension<SqlitePool>,
    Extension(state): Extension<Arc<AuthState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SignUpResponse>>), (StatusCode, String)> {
    let body = json_payload(payload)?;
    let request = SignUpRequest::try_from(body).map_err(|e| {
        tracing::warn!("Rejected signup body: {}", e);
        service_error_to_http(e)
    })?;

    let service = AccountService::new(
        AccountRepository::new(&pool),
        &state.issuer,
        state.bcrypt_cost,
    );

    service
        .sign_up(&request.user_id, &request.email, &request.password)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            SignUpResponse {
                user_id: request.user_id,
            },
            "Account created successfully",
        )),
    ))
}
