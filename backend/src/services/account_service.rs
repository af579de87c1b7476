//! Account business logic service.
//!
//! Handles signup and login: credentials are validated before the store is
//! touched, secrets are stored as bcrypt digests, and a successful login ends
//! with a signed token.

use crate::database::models::CredentialRecord;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountStore;
use crate::utils::jwt::{KeySource, TokenIssuer};
use crate::utils::validation::{self, Field, ViolationKind};
use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};
use tracing::{info, warn};

pub struct AccountService<'a, S, K> {
    store: S,
    issuer: &'a TokenIssuer<K>,
    bcrypt_cost: u32,
}

impl<'a, S, K> AccountService<'a, S, K>
where
    S: AccountStore,
    K: KeySource,
{
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// * `store` - Account store the service reads and writes
    /// * `issuer` - Token issuer used after a successful login
    /// * `bcrypt_cost` - Work factor for hashing new secrets
    pub fn new(store: S, issuer: &'a TokenIssuer<K>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            issuer,
            bcrypt_cost,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - The first field that fails validation (no store access happens)
    /// - An identifier that is already taken
    /// - Store failures
    pub async fn sign_up(&self, identifier: &str, email: &str, secret: &str) -> ServiceResult<()> {
        let record = CredentialRecord::new(identifier, email, secret).inspect_err(|e| {
            warn!(identifier = %identifier, "Signup rejected: {}", e);
        })?;

        let digest = self.hash_password(record.secret()).await.inspect_err(|e| {
            warn!(identifier = %identifier, "Signup rejected: {}", e);
        })?;
        self.store.create(&record.into_stored(digest)).await?;

        info!(identifier = %identifier, "Account created");
        Ok(())
    }

    /// Authenticates `identifier` with `secret` and issues a token.
    ///
    /// Unknown identifiers and wrong secrets both end as `Unauthorized`.
    pub async fn login(&self, identifier: &str, secret: &str) -> ServiceResult<String> {
        validation::validate(Field::Identifier, identifier).map_err(|kind| {
            warn!(identifier = %identifier, "Login rejected: identifier {}", kind);
            ServiceError::validation(Field::Identifier, kind)
        })?;

        let record = match self.store.fetch(identifier).await {
            Ok(record) => record,
            Err(ServiceError::NotFound { .. }) => {
                warn!(identifier = %identifier, "Login for unknown account");
                return Err(ServiceError::Unauthorized);
            }
            Err(e) => return Err(e),
        };

        if !Self::verify_password(secret, record.secret()).await? {
            warn!(identifier = %identifier, "Login with mismatched secret");
            return Err(ServiceError::Unauthorized);
        }

        let token = self.issuer.issue(record.identifier()).await?;
        info!(identifier = %identifier, "Login succeeded");
        Ok(token)
    }

    /// Function to hash a secret before storing it
    ///
    /// Secrets longer than bcrypt's 72 byte input are rejected rather than
    /// truncated, so every byte of the stored secret is checked at login.
    async fn hash_password(&self, secret: &str) -> ServiceResult<String> {
        let secret = secret.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || non_truncating_hash(secret, cost))
            .await
            .map_err(|e| ServiceError::store_failure(format!("Password hashing task failed: {}", e)))?;

        match hashed {
            Ok(digest) => Ok(digest),
            Err(BcryptError::Truncation(_)) => {
                Err(ServiceError::validation(Field::Secret, ViolationKind::TooLong))
            }
            Err(e) => Err(ServiceError::store_failure(format!(
                "Password hashing failed: {}",
                e
            ))),
        }
    }

    /// Function to verify a secret against the stored digest
    ///
    /// A secret too long to have been stored can never match.
    ///
    /// # Errors
    /// Returns `ServiceError::StoreFailure` if the stored digest is malformed
    async fn verify_password(secret: &str, digest: &str) -> ServiceResult<bool> {
        let secret = secret.to_owned();
        let digest = digest.to_owned();
        let verified = tokio::task::spawn_blocking(move || non_truncating_verify(secret, &digest))
            .await
            .map_err(|e| ServiceError::store_failure(format!("Password check task failed: {}", e)))?;

        match verified {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => Err(ServiceError::store_failure(format!(
                "Stored secret is not a valid digest: {}",
                e
            ))),
        }
    }
}
