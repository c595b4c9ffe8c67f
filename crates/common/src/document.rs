//! Documents and the sale order aggregate.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::money::Money;
use crate::reference::{Company, Customer, Product, User};

/// Lifecycle status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DocumentStatus {
    /// Being edited, not yet posted.
    #[default]
    Draft,

    /// Posted to the ledger.
    Posted,

    /// Marked as deleted.
    Deleted,
}

impl DocumentStatus {
    /// All valid statuses, in code order.
    pub const ALL: [DocumentStatus; 3] = [
        DocumentStatus::Draft,
        DocumentStatus::Posted,
        DocumentStatus::Deleted,
    ];

    /// Returns the stored integer code.
    pub fn code(&self) -> i64 {
        match self {
            DocumentStatus::Draft => 0,
            DocumentStatus::Posted => 1,
            DocumentStatus::Deleted => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "Draft",
            DocumentStatus::Posted => "Posted",
            DocumentStatus::Deleted => "Deleted",
        }
    }
}

impl TryFrom<i64> for DocumentStatus {
    type Error = DecodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DocumentStatus::Draft),
            1 => Ok(DocumentStatus::Posted),
            2 => Ok(DocumentStatus::Deleted),
            other => Err(DecodeError::DocumentStatus(other)),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Header fields shared by every business document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Storage-assigned identifier, `0` until persisted.
    pub id: u64,

    /// Human-readable number.
    pub number: String,

    /// Document date; only whole seconds survive storage.
    pub date: DateTime<Local>,

    pub status: DocumentStatus,

    /// The document this one was based on, by id.
    pub basis_document_id: Option<u64>,

    pub company: Company,
    pub created_by: Option<User>,
    pub modified_by: Option<User>,
}

/// A line of a sale order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleOrderProduct {
    /// Storage-assigned identifier, `0` until persisted.
    pub id: u64,
    pub product: Product,
    pub quantity: u32,
    /// Unit price.
    pub price: Money,
}

impl SaleOrderProduct {
    /// Creates an unsaved line for the given product id.
    pub fn new(product_id: u64, quantity: u32, price: Money) -> Self {
        Self {
            id: 0,
            product: Product::with_id(product_id),
            quantity,
            price,
        }
    }

    /// Returns quantity * price.
    pub fn total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// A customer order: a document header plus ordered line items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleOrder {
    pub document: Document,
    pub customer: Customer,
    /// Lines in insertion order. The same product may appear more than once.
    pub products: Vec<SaleOrderProduct>,
}

impl SaleOrder {
    /// Creates an unsaved draft order.
    pub fn new(customer: Customer, products: Vec<SaleOrderProduct>) -> Self {
        Self {
            document: Document::default(),
            customer,
            products,
        }
    }

    pub fn id(&self) -> u64 {
        self.document.id
    }

    pub fn status(&self) -> DocumentStatus {
        self.document.status
    }

    /// Distinct product ids in first-seen line order.
    pub fn distinct_product_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = Vec::with_capacity(self.products.len());
        for line in &self.products {
            if !ids.contains(&line.product.id) {
                ids.push(line.product.id);
            }
        }
        ids
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.products.iter().map(SaleOrderProduct::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_draft() {
        assert_eq!(DocumentStatus::default(), DocumentStatus::Draft);
        assert_eq!(SaleOrder::default().status(), DocumentStatus::Draft);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DocumentStatus::Draft.code(), 0);
        assert_eq!(DocumentStatus::Posted.code(), 1);
        assert_eq!(DocumentStatus::Deleted.code(), 2);

        for status in DocumentStatus::ALL {
            assert_eq!(DocumentStatus::try_from(status.code()), Ok(status));
        }
    }

    #[test]
    fn test_invalid_status_code_names_value() {
        for code in [-999, -1, 3, 999] {
            let err = DocumentStatus::try_from(code).unwrap_err();
            assert_eq!(err, DecodeError::DocumentStatus(code));
            assert!(err.to_string().contains(&code.to_string()));
        }
    }

    #[test]
    fn test_distinct_product_ids_keeps_first_seen_order() {
        let order = SaleOrder::new(
            Customer::with_id(1),
            vec![
                SaleOrderProduct::new(3, 1, Money::zero()),
                SaleOrderProduct::new(1, 1, Money::zero()),
                SaleOrderProduct::new(3, 2, Money::zero()),
                SaleOrderProduct::new(2, 1, Money::zero()),
                SaleOrderProduct::new(1, 5, Money::zero()),
            ],
        );
        assert_eq!(order.distinct_product_ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_order_total() {
        let order = SaleOrder::new(
            Customer::with_id(1),
            vec![
                SaleOrderProduct::new(1, 2, Money::from_cents(1000)),
                SaleOrderProduct::new(2, 1, Money::from_cents(250)),
            ],
        );
        assert_eq!(order.total().cents(), 2250);
    }
}
