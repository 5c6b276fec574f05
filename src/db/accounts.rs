use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{NewSignin, NewSignup, SigninRecord, SignupRecord},
};

/// Append-only persistence for signup and signin form submissions
///
/// Records are never updated or deleted and no uniqueness is enforced.
/// Ids come from the store and increase monotonically.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a signup submission and returns its id
    async fn create_signup(&self, signup: NewSignup) -> AppResult<i64>;

    /// Persists a signin attempt and returns its id
    async fn create_signin(&self, signin: NewSignin) -> AppResult<i64>;
}

/// PostgreSQL-backed account store
///
/// Concurrent writes are serialized by the database; ids come from
/// `BIGSERIAL` sequences.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn create_signup(&self, signup: NewSignup) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO signup (username, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&signup.username)
        .bind(&signup.email)
        .bind(&signup.password)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn create_signin(&self, signin: NewSignin) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO signin (username, password) VALUES ($1, $2) RETURNING id",
        )
        .bind(&signin.username)
        .bind(&signin.password)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}

/// Process-local account store, used in tests and database-less runs
#[derive(Default)]
pub struct InMemoryAccountStore {
    signups: RwLock<Vec<SignupRecord>>,
    signins: RwLock<Vec<SigninRecord>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored signups in insertion order
    pub async fn signups(&self) -> Vec<SignupRecord> {
        self.signups.read().await.clone()
    }

    /// Snapshot of all stored signins in insertion order
    pub async fn signins(&self) -> Vec<SigninRecord> {
        self.signins.read().await.clone()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create_signup(&self, signup: NewSignup) -> AppResult<i64> {
        let mut signups = self.signups.write().await;
        let id = signups.last().map_or(1, |record| record.id + 1);
        signups.push(SignupRecord::new(id, signup));
        Ok(id)
    }

    async fn create_signin(&self, signin: NewSignin) -> AppResult<i64> {
        let mut signins = self.signins.write().await;
        let id = signins.last().map_or(1, |record| record.id + 1);
        signins.push(SigninRecord::new(id, signin));
        Ok(id)
    }
}
