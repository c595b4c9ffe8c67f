//! Request-scoped context threaded through every storage call.

use std::sync::Arc;

use sqlx::{Sqlite, Transaction};
use tokio::sync::Mutex;

/// Shared slot holding a live transaction until it is committed or rolled back.
pub(crate) type TxSlot = Arc<Mutex<Option<Transaction<'static, Sqlite>>>>;

/// Immutable per-request context.
///
/// A fresh context carries no transaction, so repositories run on the pool.
/// Only [`Transactor::run_in_tx`](crate::Transactor::run_in_tx) can produce a
/// context that carries one; code outside this crate cannot read or replace it.
#[derive(Clone, Default)]
pub struct Context {
    tx: Option<TxSlot>,
}

impl Context {
    /// Returns a root context with no transaction.
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns true if queries issued with this context join a transaction.
    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    pub(crate) fn with_transaction(&self, tx: TxSlot) -> Self {
        let mut derived = self.clone();
        derived.tx = Some(tx);
        derived
    }

    pub(crate) fn transaction(&self) -> Option<&TxSlot> {
        self.tx.as_ref()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("in_transaction", &self.in_transaction())
            .finish()
    }
}
