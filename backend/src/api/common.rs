//! Error handling utilities for API responses.
//!
//! Provides the standard response envelope and the conversion from
//! service-layer errors to HTTP responses.
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.error_type`: Machine-readable error category
//! - `error.details`: Optional field-specific validation errors

use crate::errors::ServiceError;
use axum::extract::{Json, rejection::JsonRejection};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Request timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-specific validation error details
#[derive(Debug, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        error_type: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts a ServiceError into a status code and JSON error body.
///
/// Client mistakes (validation, bad credentials, duplicates) map to 4xx.
/// Store and issuer failures map to 500 and their cause is only logged.
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, error_type, message, details) = match error {
        ServiceError::Validation { field, kind } => (
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("{} {}", field, kind),
            Some(vec![FieldError {
                field: field.to_string(),
                message: kind.to_string(),
            }]),
        ),
        ServiceError::MalformedRequest { message } => {
            (StatusCode::BAD_REQUEST, "malformed_request", message, None)
        }
        ServiceError::NotFound { entity, identifier } => (
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{} '{}' not found", entity, identifier),
            None,
        ),
        ServiceError::AlreadyExists { entity, identifier } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("{} '{}' already exists", entity, identifier),
            None,
        ),
        ServiceError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Invalid credentials".to_string(),
            None,
        ),
        ServiceError::StoreFailure { cause } => {
            tracing::error!("Store failure: {}", cause);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_failure",
                "Internal server error".to_string(),
                None,
            )
        }
        ServiceError::IssuerFailure { cause } => {
            tracing::error!("Token issuer failure: {}", cause);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "issuer_failure",
                "Internal server error".to_string(),
                None,
            )
        }
    };

    let error_response = ApiResponse::<()>::error(message.clone(), error_type, details);
    let body = serde_json::to_string(&error_response).unwrap_or(message);
    (status, body)
}

/// Unwraps a JSON request body.
///
/// Undecodable bodies, non-object bodies and a missing content type are
/// reported as a malformed request in the standard envelope.
pub fn json_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, (StatusCode, String)> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        service_error_to_http(ServiceError::malformed_request(rejection.body_text()))
    })
}
