//! HTTP API server for sale orders.
//!
//! Provides endpoints to create and look up sale orders, each request running
//! in its own database transaction, with structured logging (tracing) and
//! Prometheus metrics.

pub mod access;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use domain::{
    CreateSaleOrder, GetSaleOrder, RandomNumberGenerator, SaleOrderService, SystemTimeGenerator,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;
use storage::{SaleOrderRepository, SqliteProductRepository, SqliteSaleOrderRepository, Transactor};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::sale_order::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: SaleOrderRepository + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    let sale_order_router = Router::new()
        .route(
            "/sale-order",
            get(routes::sale_order::get::<R>).post(routes::sale_order::create::<R>),
        )
        .layer(middleware::from_fn(access::check));

    Router::new()
        .merge(sale_order_router)
        .route("/health", get(routes::health::check::<R>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the SQLite repositories, services and use cases over `pool`.
pub fn create_sqlite_state(pool: SqlitePool) -> Arc<AppState<SqliteSaleOrderRepository>> {
    let service = Arc::new(SaleOrderService::new(
        SqliteSaleOrderRepository::new(pool.clone()),
        Arc::new(SqliteProductRepository::new(pool.clone())),
    ));

    Arc::new(AppState {
        transactor: Transactor::new(pool),
        create_sale_order: CreateSaleOrder::new(
            Arc::new(SystemTimeGenerator),
            Arc::new(RandomNumberGenerator),
            service.clone(),
        ),
        get_sale_order: GetSaleOrder::new(service),
    })
}
