use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::executor::DataAccessor;
use crate::store::ProductRepository;
use crate::{Context, Result};

/// SQLite-backed product lookups.
#[derive(Clone)]
pub struct SqliteProductRepository {
    db: DataAccessor,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            db: DataAccessor::new(pool),
        }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn exists(&self, ctx: &Context, id: u64) -> Result<bool> {
        // Ids beyond i64 can never have been stored.
        let Ok(id) = i64::try_from(id) else {
            return Ok(false);
        };

        let mut db = self.db.executor(ctx).await?;
        let row = db
            .fetch_optional(sqlx::query("SELECT id FROM product WHERE id = ?").bind(id))
            .await?;

        Ok(row.is_some())
    }
}
