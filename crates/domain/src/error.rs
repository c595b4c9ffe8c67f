//! Domain error types.

use common::Money;
use storage::StorageError;
use thiserror::Error;

/// Business-rule violations. These are the caller's fault and safe to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A line refers to a product that does not exist.
    #[error("Product not found: {0}")]
    UnknownProduct(u64),

    /// A line orders nothing.
    #[error("Invalid quantity for product {product_id}: {quantity} (must be greater than 0)")]
    InvalidQuantity { product_id: u64, quantity: u32 },

    /// A line has a negative unit price.
    #[error("Invalid price for product {product_id}: {price} (must not be negative)")]
    NegativePrice { product_id: u64, price: Money },
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The order was rejected by validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An error occurred in the store.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl DomainError {
    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            DomainError::Validation(err) => Some(err),
            DomainError::Storage(_) => None,
        }
    }
}
