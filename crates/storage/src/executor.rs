//! Query execution that transparently joins the context's transaction.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tokio::sync::MutexGuard;

use crate::{Context, Result, StorageError};

/// A prepared SQLite statement with its bound arguments.
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Something repositories can run statements on: the pool or a live transaction.
#[async_trait]
pub trait QueryExecutor: Send {
    /// Executes a statement and returns the driver's result (rows affected,
    /// last insert rowid).
    async fn execute<'q>(&mut self, query: SqliteQuery<'q>) -> Result<SqliteQueryResult>;

    /// Fetches at most one row.
    async fn fetch_optional<'q>(&mut self, query: SqliteQuery<'q>) -> Result<Option<SqliteRow>>;

    /// Streams rows as they are produced.
    fn fetch<'e, 'q: 'e>(
        &'e mut self,
        query: SqliteQuery<'q>,
    ) -> Result<BoxStream<'e, std::result::Result<SqliteRow, sqlx::Error>>>;
}

/// Executor backed by the connection pool; each statement may use a different
/// connection.
pub struct PoolExecutor<'a> {
    pool: &'a SqlitePool,
}

#[async_trait]
impl<'a> QueryExecutor for PoolExecutor<'a> {
    async fn execute<'q>(&mut self, query: SqliteQuery<'q>) -> Result<SqliteQueryResult> {
        Ok(query.execute(self.pool).await?)
    }

    async fn fetch_optional<'q>(&mut self, query: SqliteQuery<'q>) -> Result<Option<SqliteRow>> {
        Ok(query.fetch_optional(self.pool).await?)
    }

    fn fetch<'e, 'q: 'e>(
        &'e mut self,
        query: SqliteQuery<'q>,
    ) -> Result<BoxStream<'e, std::result::Result<SqliteRow, sqlx::Error>>> {
        Ok(query.fetch(self.pool))
    }
}

/// Executor bound to the transaction stored in a [`Context`].
///
/// Holds the slot lock for its whole lifetime, so statements issued through it
/// are serialized on the transaction's connection.
pub struct TxExecutor<'a> {
    guard: MutexGuard<'a, Option<Transaction<'static, Sqlite>>>,
}

impl TxExecutor<'_> {
    fn transaction(&mut self) -> Result<&mut Transaction<'static, Sqlite>> {
        self.guard.as_mut().ok_or(StorageError::TransactionFinished)
    }
}

#[async_trait]
impl<'a> QueryExecutor for TxExecutor<'a> {
    async fn execute<'q>(&mut self, query: SqliteQuery<'q>) -> Result<SqliteQueryResult> {
        let tx = self.transaction()?;
        Ok(query.execute(&mut **tx).await?)
    }

    async fn fetch_optional<'q>(&mut self, query: SqliteQuery<'q>) -> Result<Option<SqliteRow>> {
        let tx = self.transaction()?;
        Ok(query.fetch_optional(&mut **tx).await?)
    }

    fn fetch<'e, 'q: 'e>(
        &'e mut self,
        query: SqliteQuery<'q>,
    ) -> Result<BoxStream<'e, std::result::Result<SqliteRow, sqlx::Error>>> {
        let tx = self.transaction()?;
        Ok(query.fetch(&mut **tx))
    }
}

/// Transaction-aware data accessor shared by all SQLite repositories.
///
/// Repositories hold one of these and ask it for an executor per call instead
/// of branching on whether a transaction is active.
#[derive(Clone)]
pub struct DataAccessor {
    pool: SqlitePool,
}

impl DataAccessor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the executor for `ctx`: its transaction if it carries one,
    /// otherwise the pool.
    ///
    /// A context whose transaction has already finished is an error; it never
    /// falls back to the pool.
    pub async fn executor<'a>(&'a self, ctx: &'a Context) -> Result<Box<dyn QueryExecutor + 'a>> {
        match ctx.transaction() {
            Some(slot) => {
                let guard = slot.lock().await;
                if guard.is_none() {
                    return Err(StorageError::TransactionFinished);
                }
                Ok(Box::new(TxExecutor { guard }))
            }
            None => Ok(Box::new(PoolExecutor { pool: &self.pool })),
        }
    }
}
