//! Field policies for account identifiers, email addresses and passwords.
//!
//! Every check is pure. Length bounds are evaluated before the character or
//! format rules, and the first violation found is returned on its own.

use serde::Serialize;
use std::fmt;
use validator::ValidateEmail;

pub const IDENTIFIER_MIN_LEN: usize = 8;
pub const IDENTIFIER_MAX_LEN: usize = 64;
pub const EMAIL_MIN_LEN: usize = 10;
pub const EMAIL_MAX_LEN: usize = 128;
pub const SECRET_MIN_LEN: usize = 8;
pub const SECRET_MAX_LEN: usize = 64;

/// A user-supplied field subject to a validation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Identifier,
    Email,
    Secret,
}

impl Field {
    fn bounds(self) -> (usize, usize) {
        match self {
            Field::Identifier => (IDENTIFIER_MIN_LEN, IDENTIFIER_MAX_LEN),
            Field::Email => (EMAIL_MIN_LEN, EMAIL_MAX_LEN),
            Field::Secret => (SECRET_MIN_LEN, SECRET_MAX_LEN),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Identifier => write!(f, "UserID"),
            Field::Email => write!(f, "Email"),
            Field::Secret => write!(f, "Password"),
        }
    }
}

/// The reason a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    TooShort,
    TooLong,
    InvalidCharacters,
    MalformedAddress,
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSymbol,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ViolationKind::TooShort => "is too short",
            ViolationKind::TooLong => "is too long",
            ViolationKind::InvalidCharacters => "may only contain letters and digits",
            ViolationKind::MalformedAddress => "is not a valid email address",
            ViolationKind::MissingLowercase => "must contain a lowercase letter",
            ViolationKind::MissingUppercase => "must contain an uppercase letter",
            ViolationKind::MissingDigit => "must contain a digit",
            ViolationKind::MissingSymbol => "must contain a symbol",
        };
        f.write_str(text)
    }
}

/// Checks `value` against the policy of `field`.
pub fn validate(field: Field, value: &str) -> Result<(), ViolationKind> {
    check_length(field, value)?;
    match field {
        Field::Identifier => check_identifier_chars(value),
        Field::Email => check_address(value),
        Field::Secret => check_secret_classes(value),
    }
}

fn check_length(field: Field, value: &str) -> Result<(), ViolationKind> {
    let (min, max) = field.bounds();
    let len = value.chars().count();
    if len < min {
        return Err(ViolationKind::TooShort);
    }
    if len > max {
        return Err(ViolationKind::TooLong);
    }
    Ok(())
}

fn check_identifier_chars(value: &str) -> Result<(), ViolationKind> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ViolationKind::InvalidCharacters)
    }
}

fn check_address(value: &str) -> Result<(), ViolationKind> {
    match addr_spec(value) {
        Some(addr) if addr.validate_email() => Ok(()),
        _ => Err(ViolationKind::MalformedAddress),
    }
}

/// Extracts the `local@domain` part from `addr`, `<addr>` or `Name <addr>`.
fn addr_spec(value: &str) -> Option<&str> {
    let value = value.trim();
    match value.rfind('<') {
        Some(open) => {
            let inner = value[open + 1..].strip_suffix('>')?;
            let display_name = &value[..open];
            if display_name.contains(['<', '>', '@']) {
                return None;
            }
            Some(inner.trim())
        }
        None if value.contains('>') => None,
        None => Some(value),
    }
}

/// Character classes use Unicode categories throughout, so every character
/// is a letter, a digit, or a symbol.
fn check_secret_classes(value: &str) -> Result<(), ViolationKind> {
    if !value.chars().any(char::is_lowercase) {
        return Err(ViolationKind::MissingLowercase);
    }
    if !value.chars().any(char::is_uppercase) {
        return Err(ViolationKind::MissingUppercase);
    }
    if !value.chars().any(char::is_numeric) {
        return Err(ViolationKind::MissingDigit);
    }
    if !value.chars().any(|c| !c.is_alphanumeric()) {
        return Err(ViolationKind::MissingSymbol);
    }
    Ok(())
}
