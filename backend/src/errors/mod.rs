//! Global application error types.
//!
//! Every failing path in the service ends in one of these variants. The HTTP
//! layer maps them to status codes in `api::common::service_error_to_http`.

use crate::utils::validation::{Field, ViolationKind};
use thiserror::Error;

/// Service error shared by validation, storage, and token issuance.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {field} {kind}")]
    Validation { field: Field, kind: ViolationKind },

    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Store failure: {cause}")]
    StoreFailure { cause: String },

    #[error("Token issuer failure: {cause}")]
    IssuerFailure { cause: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(field: Field, kind: ViolationKind) -> Self {
        Self::Validation { field, kind }
    }

    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn store_failure(cause: impl ToString) -> Self {
        Self::StoreFailure {
            cause: cause.to_string(),
        }
    }

    pub fn issuer_failure(cause: impl ToString) -> Self {
        Self::IssuerFailure {
            cause: cause.to_string(),
        }
    }

    /// The violation carried by a validation error, if any.
    pub fn violation(&self) -> Option<ViolationKind> {
        match self {
            Self::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::store_failure(error)
    }
}
