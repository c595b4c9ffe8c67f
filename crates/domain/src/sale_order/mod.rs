//! Sale order validation and persistence orchestration.

mod service;

pub use service::SaleOrderService;
