//! Reference entities: lightweight, status-bearing master-data records.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Lifecycle status of a reference entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReferenceStatus {
    #[default]
    Active,
    Deleted,
}

impl ReferenceStatus {
    /// All valid statuses, in code order.
    pub const ALL: [ReferenceStatus; 2] = [ReferenceStatus::Active, ReferenceStatus::Deleted];

    /// Returns the stored integer code.
    pub fn code(&self) -> i64 {
        match self {
            ReferenceStatus::Active => 0,
            ReferenceStatus::Deleted => 1,
        }
    }
}

impl TryFrom<i64> for ReferenceStatus {
    type Error = DecodeError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ReferenceStatus::Active),
            1 => Ok(ReferenceStatus::Deleted),
            other => Err(DecodeError::ReferenceStatus(other)),
        }
    }
}

/// Identifier, display name and status shared by every reference entity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reference {
    pub id: u64,
    pub name: String,
    pub status: ReferenceStatus,
}

impl Reference {
    /// Creates a reference that only carries an identifier.
    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn new(id: u64, name: impl Into<String>, status: ReferenceStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
        }
    }
}

macro_rules! reference_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Reference);

        impl $name {
            /// Creates a reference that only carries an identifier.
            pub fn with_id(id: u64) -> Self {
                Self(Reference::with_id(id))
            }
        }

        impl Deref for $name {
            type Target = Reference;

            fn deref(&self) -> &Reference {
                &self.0
            }
        }

        impl From<Reference> for $name {
            fn from(reference: Reference) -> Self {
                Self(reference)
            }
        }
    };
}

reference_entity!(
    /// A sellable product.
    Product
);
reference_entity!(
    /// The company issuing a document.
    Company
);
reference_entity!(
    /// The customer a sale order is addressed to.
    Customer
);
reference_entity!(
    /// A user recorded as author or last editor of a document.
    User
);
