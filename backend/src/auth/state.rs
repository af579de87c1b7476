//! Shared authentication dependencies handed to the HTTP handlers.

use crate::config::Config;
use crate::utils::jwt::{FileKeySource, TokenIssuer};

/// Token issuer and hashing cost shared by every request.
pub struct AuthState {
    pub issuer: TokenIssuer<FileKeySource>,
    pub bcrypt_cost: u32,
}

impl AuthState {
    pub fn new(issuer: TokenIssuer<FileKeySource>, bcrypt_cost: u32) -> Self {
        Self {
            issuer,
            bcrypt_cost,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let keys = FileKeySource::new(config.jwt_private_key_path.clone());
        Self::new(TokenIssuer::new(keys), config.bcrypt_cost)
    }
}
