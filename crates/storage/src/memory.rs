//! In-memory repositories for tests and benchmarks.
//!
//! They ignore the context's transaction: writes are visible immediately and
//! are never rolled back.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use common::SaleOrder;
use tokio::sync::RwLock;

use crate::store::{ProductRepository, SaleOrderRepository};
use crate::{Context, Result, StorageError};

#[derive(Debug, Default)]
struct InMemorySaleOrderState {
    orders: Vec<SaleOrder>,
    last_order_id: u64,
    last_line_id: u64,
    fail_on_create: bool,
}

/// In-memory sale order repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySaleOrderRepository {
    state: Arc<RwLock<InMemorySaleOrderState>>,
}

impl InMemorySaleOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the repository to fail every create call.
    pub async fn set_fail_on_create(&self, fail: bool) {
        self.state.write().await.fail_on_create = fail;
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

#[async_trait]
impl SaleOrderRepository for InMemorySaleOrderRepository {
    async fn create_order(&self, _ctx: &Context, mut order: SaleOrder) -> Result<SaleOrder> {
        let mut state = self.state.write().await;
        if state.fail_on_create {
            return Err(StorageError::Unavailable("create_order".to_string()));
        }

        state.last_order_id += 1;
        order.document.id = state.last_order_id;
        for line in order.products.iter_mut() {
            state.last_line_id += 1;
            line.id = state.last_line_id;
        }

        state.orders.push(order.clone());
        Ok(order)
    }

    async fn get_by_id(&self, _ctx: &Context, id: u64) -> Result<Option<SaleOrder>> {
        let state = self.state.read().await;
        Ok(state.orders.iter().find(|o| o.document.id == id).cloned())
    }
}

#[derive(Debug, Default)]
struct InMemoryProductState {
    products: HashSet<u64>,
    probes: Vec<u64>,
    fail_on: Option<u64>,
}

/// In-memory product repository that records every id it is asked about.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryProductState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository containing the given product ids.
    pub fn with_products(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryProductState {
                products: ids.into_iter().collect(),
                ..InMemoryProductState::default()
            })),
        }
    }

    pub async fn add_product(&self, id: u64) {
        self.state.write().await.products.insert(id);
    }

    /// Configures `exists(id)` to fail with a storage error.
    pub async fn set_fail_on(&self, id: Option<u64>) {
        self.state.write().await.fail_on = id;
    }

    /// Ids passed to `exists`, in call order.
    pub async fn probed(&self) -> Vec<u64> {
        self.state.read().await.probes.clone()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn exists(&self, _ctx: &Context, id: u64) -> Result<bool> {
        let mut state = self.state.write().await;
        state.probes.push(id);
        if state.fail_on == Some(id) {
            return Err(StorageError::Unavailable(format!("product lookup {id}")));
        }
        Ok(state.products.contains(&id))
    }
}
