//! Domain layer for the sale order service.
//!
//! This crate provides:
//! - Validation of sale orders against business rules and reference data
//! - `SaleOrderService` orchestrating validation and persistence
//! - `CreateSaleOrder` / `GetSaleOrder` use cases
//! - Date and document number generators

pub mod error;
pub mod generators;
pub mod sale_order;
pub mod use_case;

pub use error::{DomainError, ValidationError};
pub use generators::{
    FixedTimeGenerator, NumberGenerator, RandomNumberGenerator, SystemTimeGenerator, TimeGenerator,
};
pub use sale_order::SaleOrderService;
pub use use_case::{CreateSaleOrder, GetSaleOrder};
