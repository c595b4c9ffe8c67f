//! Transaction-aware storage for the sale order service.
//!
//! Repositories never open transactions themselves. A [`Transactor`] opens one,
//! records it in a [`Context`], and every repository call that receives that
//! context (directly or through any number of layers) runs its queries on the
//! same transaction via the [`DataAccessor`].

pub mod context;
pub mod error;
pub mod executor;
pub mod memory;
pub mod pool;
pub mod product;
pub mod sale_order;
pub mod store;
pub mod transactor;

pub use context::Context;
pub use error::{Result, StorageError};
pub use executor::{DataAccessor, QueryExecutor, SqliteQuery};
pub use memory::{InMemoryProductRepository, InMemorySaleOrderRepository};
pub use pool::{connect, connect_in_memory, run_migrations};
pub use product::SqliteProductRepository;
pub use sale_order::{LinePersistence, SqliteSaleOrderRepository};
pub use store::{ProductRepository, SaleOrderRepository};
pub use transactor::Transactor;
