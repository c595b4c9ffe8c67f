use async_trait::async_trait;
use common::SaleOrder;

use crate::{Context, Result};

/// Persistence of sale orders and their line items.
///
/// Implementations run every statement through the executor selected by `ctx`,
/// so a caller inside [`Transactor::run_in_tx`](crate::Transactor::run_in_tx)
/// gets all-or-nothing semantics without the repository knowing about it.
#[async_trait]
pub trait SaleOrderRepository: Send + Sync {
    /// Inserts the header and then each line item in order, assigning the
    /// generated ids back onto the returned order.
    ///
    /// Fails fast on the first failed insert. Rows already written are left for
    /// the surrounding transaction to roll back.
    async fn create_order(&self, ctx: &Context, order: SaleOrder) -> Result<SaleOrder>;

    /// Loads an order with its line items.
    ///
    /// Returns `Ok(None)` when no order has this id.
    async fn get_by_id(&self, ctx: &Context, id: u64) -> Result<Option<SaleOrder>>;
}

/// Existence checks against the product master data.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns whether a product with this id exists. Absence is not an error.
    async fn exists(&self, ctx: &Context, id: u64) -> Result<bool>;
}
