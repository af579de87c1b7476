//! JWT token issuance for authenticated accounts.
//!
//! Tokens are stateless: each one carries the issuer, subject, audience,
//! issue time, and a fixed seven day expiry, signed with the service's RSA
//! private key (RS256).

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, error};

use crate::errors::{ServiceError, ServiceResult};

/// Issuer name written into every token.
pub const TOKEN_ISSUER: &str = "Auth-Service";
/// Audience the tokens are minted for.
pub const TOKEN_AUDIENCE: &str = "Moment-Service";
/// Validity window of a token.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

/// JWT claim set
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub iss: String,
    /// Account identifier
    pub sub: String,
    pub aud: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Builds the claim set for `identifier` issued at `now`.
    pub fn for_identifier(identifier: &str, now: DateTime<Utc>) -> Self {
        let exp = now + Duration::days(TOKEN_LIFETIME_DAYS);
        Claims {
            iss: TOKEN_ISSUER.to_string(),
            sub: identifier.to_string(),
            aud: TOKEN_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Source of the PEM encoded RSA private key used for signing.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn read_private_key(&self) -> ServiceResult<Vec<u8>>;
}

/// Reads the private key from a file on every call.
#[derive(Debug, Clone)]
pub struct FileKeySource {
    path: PathBuf,
}

impl FileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KeySource for FileKeySource {
    async fn read_private_key(&self) -> ServiceResult<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            error!("Failed to read signing key {}: {}", self.path.display(), e);
            ServiceError::issuer_failure(format!("reading signing key: {}", e))
        })
    }
}

/// Signs claim sets into compact JWT strings.
pub struct TokenIssuer<K> {
    keys: K,
}

impl<K: KeySource> TokenIssuer<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    /// Issues a token asserting `identifier`, valid for seven days from now.
    pub async fn issue(&self, identifier: &str) -> ServiceResult<String> {
        self.issue_at(identifier, Utc::now()).await
    }

    /// Issues a token as if the current time were `now`.
    pub async fn issue_at(&self, identifier: &str, now: DateTime<Utc>) -> ServiceResult<String> {
        let pem = self.keys.read_private_key().await?;
        let key = EncodingKey::from_rsa_pem(&pem)
            .map_err(|e| ServiceError::issuer_failure(format!("parsing signing key: {}", e)))?;

        let claims = Claims::for_identifier(identifier, now);
        let token = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| ServiceError::issuer_failure(format!("signing token: {}", e)))?;

        debug!(identifier = %identifier, exp = claims.exp, "Token issued");
        Ok(token)
    }
}
