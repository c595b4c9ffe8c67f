//! Sale order create and lookup endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use common::{Customer, Money, SaleOrder, SaleOrderProduct};
use domain::{CreateSaleOrder, GetSaleOrder};
use serde::Deserialize;
use storage::{Context, SaleOrderRepository, Transactor};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: SaleOrderRepository> {
    pub transactor: Transactor,
    pub create_sale_order: CreateSaleOrder<R>,
    pub get_sale_order: GetSaleOrder<R>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateSaleOrderRequest {
    #[serde(default)]
    pub customer_id: u64,
    #[serde(default)]
    pub products: Vec<SaleOrderProductRequest>,
}

#[derive(Debug, Deserialize)]
pub struct SaleOrderProductRequest {
    #[serde(default)]
    pub product_id: u64,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub price_cents: i64,
}

impl CreateSaleOrderRequest {
    /// Shallow checks only; business rules are enforced by the domain.
    fn into_sale_order(self) -> Option<SaleOrder> {
        if self.customer_id == 0 || self.products.is_empty() {
            return None;
        }

        let products = self
            .products
            .into_iter()
            .map(|line| {
                let quantity = u32::try_from(line.quantity).ok().filter(|&q| q > 0)?;
                (line.product_id > 0).then(|| {
                    SaleOrderProduct::new(
                        line.product_id,
                        quantity,
                        Money::from_cents(line.price_cents),
                    )
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(SaleOrder::new(Customer::with_id(self.customer_id), products))
    }
}

#[derive(Debug, Deserialize)]
pub struct GetSaleOrderParams {
    pub id: Option<String>,
}

impl GetSaleOrderParams {
    fn sale_order_id(&self) -> Result<u64, ApiError> {
        let raw = self.id.as_deref().unwrap_or_default();
        let id: i64 = raw
            .parse()
            .map_err(|e| ApiError::BadRequest(format!("bad id: {e}")))?;

        u64::try_from(id)
            .ok()
            .filter(|&id| id > 0)
            .ok_or_else(|| ApiError::BadRequest("bad id".to_string()))
    }
}

// -- Handlers --

/// POST /sale-order: validate, create inside a transaction, reply with the id.
#[tracing::instrument(skip(state, body))]
pub async fn create<R: SaleOrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    body: Bytes,
) -> Result<String, ApiError> {
    let request: CreateSaleOrderRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("bad order data: {e}")))?;
    let order = request
        .into_sale_order()
        .ok_or_else(|| ApiError::BadRequest("bad order data".to_string()))?;

    let create_sale_order = &state.create_sale_order;
    let created = state
        .transactor
        .run_in_tx(&Context::background(), move |ctx| async move {
            create_sale_order.handle(&ctx, order).await
        })
        .await?;

    Ok(format!("SaleOrder ID = {}", created.id()))
}

/// GET /sale-order?id=N: look up an order by id.
#[tracing::instrument(skip(state))]
pub async fn get<R: SaleOrderRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Query(params): Query<GetSaleOrderParams>,
) -> Result<String, ApiError> {
    let id = params.sale_order_id()?;

    let get_sale_order = &state.get_sale_order;
    let order = state
        .transactor
        .run_in_tx(&Context::background(), move |ctx| async move {
            get_sale_order.handle(&ctx, id).await
        })
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(format!("SaleOrder ID = {}", order.id()))
}
