//! Shared types for the sale order service.
//!
//! Documents (sale orders and their line items) are owned by this service;
//! reference entities (products, companies, customers, users) are pointers into
//! a separate master-data domain and are only ever looked up by id.

pub mod date;
pub mod document;
pub mod error;
pub mod money;
pub mod reference;

pub use date::{DATE_FORMAT, format_date, parse_date};
pub use document::{Document, DocumentStatus, SaleOrder, SaleOrderProduct};
pub use error::DecodeError;
pub use money::Money;
pub use reference::{Company, Customer, Product, Reference, ReferenceStatus, User};
