//! Runs units of work inside a database transaction.

use std::future::Future;
use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::context::TxSlot;
use crate::{Context, StorageError};

/// Opens a transaction per call and hands it to nested repository calls
/// through the derived [`Context`].
#[derive(Clone)]
pub struct Transactor {
    pool: SqlitePool,
}

impl Transactor {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs `unit_of_work` inside a new write (`BEGIN IMMEDIATE`) transaction.
    ///
    /// - If opening the transaction fails, `unit_of_work` is never invoked.
    /// - If `unit_of_work` fails, the transaction is rolled back and its error
    ///   is returned unchanged.
    /// - Otherwise the transaction is committed; a commit failure replaces the
    ///   unit's result.
    ///
    /// Dropping the returned future before it completes drops the transaction,
    /// which rolls it back. Nesting is rejected with
    /// [`StorageError::NestedTransaction`].
    pub async fn run_in_tx<T, E, F, Fut>(&self, ctx: &Context, unit_of_work: F) -> Result<T, E>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<StorageError>,
    {
        if ctx.in_transaction() {
            return Err(StorageError::NestedTransaction.into());
        }

        // IMMEDIATE takes the write lock up front: a unit that reads before it
        // writes waits on the busy timeout instead of failing its lock upgrade.
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(StorageError::from)?;
        let slot: TxSlot = Arc::new(Mutex::new(Some(tx)));

        let result = unit_of_work(ctx.with_transaction(slot.clone())).await;

        // Contexts leaked out of the unit of work see TransactionFinished from here on.
        let tx = slot
            .lock()
            .await
            .take()
            .ok_or(StorageError::TransactionFinished)?;

        match result {
            Ok(value) => {
                if let Err(e) = tx.commit().await {
                    metrics::counter!("sale_order_transactions_total", "outcome" => "commit_failed")
                        .increment(1);
                    tracing::error!(error = %e, "transaction commit failed");
                    return Err(StorageError::from(e).into());
                }
                metrics::counter!("sale_order_transactions_total", "outcome" => "commit")
                    .increment(1);
                Ok(value)
            }
            Err(err) => {
                if let Err(e) = tx.rollback().await {
                    tracing::warn!(error = %e, "transaction rollback failed");
                }
                metrics::counter!("sale_order_transactions_total", "outcome" => "rollback")
                    .increment(1);
                Err(err)
            }
        }
    }
}
