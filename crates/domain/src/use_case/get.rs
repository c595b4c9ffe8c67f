use std::sync::Arc;

use common::SaleOrder;
use storage::{Context, SaleOrderRepository};

use crate::error::DomainError;
use crate::sale_order::SaleOrderService;

/// Loads a single sale order.
pub struct GetSaleOrder<R: SaleOrderRepository> {
    service: Arc<SaleOrderService<R>>,
}

impl<R: SaleOrderRepository> GetSaleOrder<R> {
    pub fn new(service: Arc<SaleOrderService<R>>) -> Self {
        Self { service }
    }

    #[tracing::instrument(skip(self, ctx))]
    pub async fn handle(&self, ctx: &Context, id: u64) -> Result<Option<SaleOrder>, DomainError> {
        self.service.get_order_by_id(ctx, id).await
    }
}
