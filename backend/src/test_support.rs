//! Shared fixtures for unit tests: an in-memory database, the RSA test key
//! pair, and an account store double that records how often it is called.

use crate::database::{self, models::CredentialRecord};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::AccountStore;
use crate::utils::jwt::{Claims, KeySource, TOKEN_AUDIENCE, TOKEN_ISSUER};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_PRIVATE_KEY: &[u8] = include_bytes!("../test-keys/jwt_private.pem");
pub const TEST_PUBLIC_KEY: &[u8] = include_bytes!("../test-keys/jwt_public.pem");

/// Lowest work factor bcrypt accepts; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

/// A migrated in-memory database.
///
/// Every SQLite `:memory:` connection is its own database, so the pool is
/// pinned to a single connection that never expires.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    database::migrate(&pool).await.expect("migrations");
    pool
}

/// Verifies a token against the test public key, issuer, and audience.
pub fn decode_test_token(token: &str) -> jsonwebtoken::errors::Result<Claims> {
    let key = DecodingKey::from_rsa_pem(TEST_PUBLIC_KEY)?;
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_audience(&[TOKEN_AUDIENCE]);
    decode::<Claims>(token, &key, &validation).map(|data| data.claims)
}

/// Key source that hands out fixed bytes.
pub struct StaticKeySource {
    key: Vec<u8>,
}

impl StaticKeySource {
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn read_private_key(&self) -> ServiceResult<Vec<u8>> {
        Ok(self.key.clone())
    }
}

/// In-memory account store that counts every call that reaches it.
#[derive(Clone, Default)]
pub struct CountingStore {
    calls: Arc<AtomicUsize>,
    rows: Arc<Mutex<HashMap<String, CredentialRecord>>>,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for CountingStore {
    async fn create(&self, record: &CredentialRecord) -> ServiceResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(record.identifier()) {
            return Err(ServiceError::already_exists("Account", record.identifier()));
        }
        rows.insert(record.identifier().to_string(), record.clone());
        Ok(())
    }

    async fn fetch(&self, identifier: &str) -> ServiceResult<CredentialRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .unwrap()
            .get(identifier)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Account", identifier))
    }
}
