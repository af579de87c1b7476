//! Request and response payloads for the signup and login endpoints.
//!
//! Each endpoint declares the exact set of body fields it accepts. A body
//! with a missing, empty, or unexpected key is rejected before any field
//! validation runs.

use crate::errors::{ServiceError, ServiceResult};
use serde::Serialize;
use serde_json::{Map, Value};

/// Endpoints that accept a credential body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    SignUp,
    Login,
}

impl RequestKind {
    /// Body keys the endpoint requires, and the only ones it accepts.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            RequestKind::SignUp => &["UserID", "Email", "Password"],
            RequestKind::Login => &["UserID", "Password"],
        }
    }

    /// Checks `body` against the declared field list.
    pub fn check_fields(self, body: &Map<String, Value>) -> ServiceResult<()> {
        let required = self.required_fields();

        if let Some(extra) = body.keys().find(|key| !required.contains(&key.as_str())) {
            return Err(ServiceError::malformed_request(format!(
                "unexpected field '{}'",
                extra
            )));
        }

        for name in required {
            match body.get(*name) {
                Some(Value::String(value)) if !value.is_empty() => {}
                Some(Value::String(_)) | None => {
                    return Err(ServiceError::malformed_request(format!(
                        "missing field '{}'",
                        name
                    )));
                }
                Some(_) => {
                    return Err(ServiceError::malformed_request(format!(
                        "field '{}' must be a string",
                        name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn take_string(body: &mut Map<String, Value>, name: &str) -> String {
    match body.remove(name) {
        Some(Value::String(value)) => value,
        _ => String::new(),
    }
}

/// Signup request payload
#[derive(Debug)]
pub struct SignUpRequest {
    pub user_id: String,
    pub email: String,
    pub password: String,
}

impl TryFrom<Map<String, Value>> for SignUpRequest {
    type Error = ServiceError;

    fn try_from(mut body: Map<String, Value>) -> ServiceResult<Self> {
        RequestKind::SignUp.check_fields(&body)?;
        Ok(SignUpRequest {
            user_id: take_string(&mut body, "UserID"),
            email: take_string(&mut body, "Email"),
            password: take_string(&mut body, "Password"),
        })
    }
}

/// Login request payload
#[derive(Debug)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

impl TryFrom<Map<String, Value>> for LoginRequest {
    type Error = ServiceError;

    fn try_from(mut body: Map<String, Value>) -> ServiceResult<Self> {
        RequestKind::Login.check_fields(&body)?;
        Ok(LoginRequest {
            user_id: take_string(&mut body, "UserID"),
            password: take_string(&mut body, "Password"),
        })
    }
}

/// Signup response data
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user_id: String,
}

/// Login response containing the signed token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64, // Token lifetime in seconds
}
