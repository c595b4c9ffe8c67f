//! Application use cases built on [`SaleOrderService`](crate::SaleOrderService).

mod create;
mod get;

pub use create::CreateSaleOrder;
pub use get::GetSaleOrder;
