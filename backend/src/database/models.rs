//! Rust structs that represent the `accounts` table and the validated
//! credential triple that is written to and read from it.

use crate::errors::{ServiceError, ServiceResult};
use crate::utils::validation::{self, Field, ViolationKind};
use serde::Serialize;
use sqlx::FromRow;

/// A row of the `accounts` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub identifier: String,
    pub email: String,
    pub secret: String,
}

/// The first field rejected while building a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: Field,
    pub kind: ViolationKind,
}

impl From<FieldViolation> for ServiceError {
    fn from(violation: FieldViolation) -> Self {
        ServiceError::validation(violation.field, violation.kind)
    }
}

/// A validated identifier, email, and secret.
///
/// Records only come out of [`CredentialBuilder::build`] or from a stored
/// row, so holding one means every field already passed its policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    identifier: String,
    email: String,
    secret: String,
}

impl CredentialRecord {
    /// Validates identifier, email, then secret, stopping at the first failure.
    pub fn new(identifier: &str, email: &str, secret: &str) -> ServiceResult<Self> {
        CredentialBuilder::new()
            .identifier(identifier)
            .email(email)
            .secret(secret)
            .build()
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Replaces the secret with its stored form before persistence.
    pub fn into_stored(self, stored_secret: String) -> Self {
        Self {
            secret: stored_secret,
            ..self
        }
    }
}

impl From<AccountRow> for CredentialRecord {
    fn from(row: AccountRow) -> Self {
        Self {
            identifier: row.identifier,
            email: row.email,
            secret: row.secret,
        }
    }
}

/// Fail-fast builder for [`CredentialRecord`].
///
/// Once a setter rejects its input every later setter is a no-op, so the
/// fields after the failing one stay empty.
#[derive(Debug, Default)]
pub struct CredentialBuilder {
    identifier: String,
    email: String,
    secret: String,
    error: Option<FieldViolation>,
}

impl CredentialBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identifier(self, value: &str) -> Self {
        self.set(Field::Identifier, value)
    }

    pub fn email(self, value: &str) -> Self {
        self.set(Field::Email, value)
    }

    pub fn secret(self, value: &str) -> Self {
        self.set(Field::Secret, value)
    }

    fn set(mut self, field: Field, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match validation::validate(field, value) {
            Ok(()) => {
                let slot = match field {
                    Field::Identifier => &mut self.identifier,
                    Field::Email => &mut self.email,
                    Field::Secret => &mut self.secret,
                };
                *slot = value.to_string();
            }
            Err(kind) => self.error = Some(FieldViolation { field, kind }),
        }
        self
    }

    /// The first violation recorded, if any.
    pub fn error(&self) -> Option<FieldViolation> {
        self.error
    }

    /// The accepted secret, or an empty string once any field failed.
    pub fn secret_value(&self) -> &str {
        if self.error.is_some() { "" } else { &self.secret }
    }

    pub fn build(self) -> ServiceResult<CredentialRecord> {
        if let Some(violation) = self.error() {
            return Err(violation.into());
        }
        for (field, value) in [
            (Field::Identifier, &self.identifier),
            (Field::Email, &self.email),
            (Field::Secret, &self.secret),
        ] {
            if value.is_empty() {
                return Err(ServiceError::validation(field, ViolationKind::TooShort));
            }
        }
        Ok(CredentialRecord {
            identifier: self.identifier,
            email: self.email,
            secret: self.secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "testuser";
    const EMAIL: &str = "<testemail@email.com>";
    const PASSWORD: &str = "TestPassword123!";

    #[test]
    fn test_new_credential_valid() {
        let record = CredentialRecord::new(USER, EMAIL, PASSWORD).unwrap();
        assert_eq!(record.identifier(), USER);
        assert_eq!(record.email(), EMAIL);
        assert_eq!(record.secret(), PASSWORD);
    }

    #[test]
    fn test_identifier_failure_short_circuits() {
        let builder = CredentialBuilder::new()
            .identifier("user")
            .email(EMAIL)
            .secret(PASSWORD);

        assert_eq!(
            builder.error(),
            Some(FieldViolation {
                field: Field::Identifier,
                kind: ViolationKind::TooShort,
            })
        );
        assert_eq!(builder.secret_value(), "");
        assert!(builder.email.is_empty());
        assert!(builder.secret.is_empty());
    }

    #[test]
    fn test_email_failure_keeps_identifier_only() {
        let builder = CredentialBuilder::new()
            .identifier(USER)
            .email("<notanemail>")
            .secret(PASSWORD);

        assert_eq!(builder.identifier, USER);
        assert!(builder.secret.is_empty());
        assert_eq!(
            builder.error().map(|v| v.kind),
            Some(ViolationKind::MalformedAddress)
        );
    }

    #[test]
    fn test_later_error_does_not_overwrite_first() {
        let err = CredentialRecord::new("user", "bad", "bad").unwrap_err();
        match err {
            ServiceError::Validation { field, kind } => {
                assert_eq!(field, Field::Identifier);
                assert_eq!(kind, ViolationKind::TooShort);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_secret_value_exposed_when_valid() {
        let builder = CredentialBuilder::new()
            .identifier(USER)
            .email(EMAIL)
            .secret(PASSWORD);
        assert!(builder.error().is_none());
        assert_eq!(builder.secret_value(), PASSWORD);
    }

    #[test]
    fn test_build_requires_every_field() {
        let err = CredentialBuilder::new().identifier(USER).build().unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation {
                field: Field::Email,
                ..
            }
        ));
    }

    #[test]
    fn test_into_stored_replaces_secret_only() {
        let record = CredentialRecord::new(USER, EMAIL, PASSWORD)
            .unwrap()
            .into_stored("digest".to_string());
        assert_eq!(record.identifier(), USER);
        assert_eq!(record.email(), EMAIL);
        assert_eq!(record.secret(), "digest");
    }
}
