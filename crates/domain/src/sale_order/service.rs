//! Sale order service: validates orders and hands them to the repository.

use std::sync::Arc;

use common::SaleOrder;
use storage::{Context, ProductRepository, SaleOrderRepository};

use crate::error::{DomainError, ValidationError};

/// Service for validating and persisting sale orders.
///
/// Reference checks are optional: a service built with
/// [`SaleOrderService::without_reference_checks`] accepts any product id.
pub struct SaleOrderService<R: SaleOrderRepository> {
    repository: R,
    products: Option<Arc<dyn ProductRepository>>,
}

impl<R: SaleOrderRepository> SaleOrderService<R> {
    /// Creates a service that checks every referenced product exists.
    pub fn new(repository: R, products: Arc<dyn ProductRepository>) -> Self {
        Self {
            repository,
            products: Some(products),
        }
    }

    pub fn without_reference_checks(repository: R) -> Self {
        Self {
            repository,
            products: None,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Checks an order against business rules and reference data.
    ///
    /// Line rules are checked first, in line order. Then each distinct product
    /// id is looked up once, in first-seen order; the first lookup error or
    /// missing product stops the check.
    #[tracing::instrument(skip(self, ctx, order), fields(lines = order.products.len()))]
    pub async fn validate_order(
        &self,
        ctx: &Context,
        order: &SaleOrder,
    ) -> Result<(), DomainError> {
        for line in &order.products {
            if line.quantity == 0 {
                return Err(ValidationError::InvalidQuantity {
                    product_id: line.product.id,
                    quantity: line.quantity,
                }
                .into());
            }
            if line.price.is_negative() {
                return Err(ValidationError::NegativePrice {
                    product_id: line.product.id,
                    price: line.price,
                }
                .into());
            }
        }

        let Some(products) = &self.products else {
            return Ok(());
        };

        for product_id in order.distinct_product_ids() {
            if !products.exists(ctx, product_id).await? {
                return Err(ValidationError::UnknownProduct(product_id).into());
            }
        }

        Ok(())
    }

    /// Validates and persists an order, returning it with assigned ids.
    #[tracing::instrument(skip(self, ctx, order), fields(customer_id = order.customer.id))]
    pub async fn create_order(
        &self,
        ctx: &Context,
        order: SaleOrder,
    ) -> Result<SaleOrder, DomainError> {
        if let Err(e) = self.validate_order(ctx, &order).await {
            if e.as_validation().is_some() {
                metrics::counter!("sale_order_validation_failures_total").increment(1);
            }
            return Err(e);
        }

        let order = self.repository.create_order(ctx, order).await?;

        metrics::counter!("sale_orders_created_total").increment(1);
        tracing::info!(
            sale_order_id = order.id(),
            number = %order.document.number,
            "sale order created"
        );

        Ok(order)
    }

    /// Loads an order by id. Absence is not an error.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get_order_by_id(
        &self,
        ctx: &Context,
        id: u64,
    ) -> Result<Option<SaleOrder>, DomainError> {
        Ok(self.repository.get_by_id(ctx, id).await?)
    }
}
