//! Database repository for account credentials.
//!
//! Provides the two store operations the service needs: inserting a new
//! account and looking one up by identifier.

use crate::database::models::{AccountRow, CredentialRecord};
use crate::errors::{ServiceError, ServiceResult};
use crate::utils::validation::{self, Field};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, warn};

/// Backing store for account credentials.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts `record` as a single row.
    ///
    /// A duplicate identifier is reported as `AlreadyExists`; any other
    /// outcome that is not exactly one affected row is a `StoreFailure`.
    async fn create(&self, record: &CredentialRecord) -> ServiceResult<()>;

    /// Looks up the account stored under `identifier`.
    async fn fetch(&self, identifier: &str) -> ServiceResult<CredentialRecord>;
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> AccountRepository<'a> {
    /// Creates a new AccountRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepository<'_> {
    async fn create(&self, record: &CredentialRecord) -> ServiceResult<()> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO accounts (identifier, email, secret)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(record.identifier())
        .bind(record.email())
        .bind(record.secret())
        .execute(&mut *conn)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 1 => {
                debug!(identifier = %record.identifier(), "Account row inserted");
                Ok(())
            }
            Ok(done) => Err(ServiceError::store_failure(format!(
                "expected 1 row affected, got {}",
                done.rows_affected()
            ))),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                warn!(identifier = %record.identifier(), "Duplicate account identifier");
                Err(ServiceError::already_exists("Account", record.identifier()))
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn fetch(&self, identifier: &str) -> ServiceResult<CredentialRecord> {
        validation::validate(Field::Identifier, identifier)
            .map_err(|kind| ServiceError::validation(Field::Identifier, kind))?;

        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT identifier, email, secret
            FROM accounts
            WHERE identifier = ?
            "#,
        )
        .bind(identifier)
        .fetch_optional(&mut *conn)
        .await?;

        row.map(CredentialRecord::from)
            .ok_or_else(|| ServiceError::not_found("Account", identifier))
    }
}
