use async_trait::async_trait;
use common::{
    Company, Customer, Document, DocumentStatus, Money, Product, Reference, ReferenceStatus,
    SaleOrder, SaleOrderProduct, User, format_date, parse_date,
};
use futures_util::TryStreamExt;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::{from_db_id, to_db_id};
use crate::executor::DataAccessor;
use crate::store::SaleOrderRepository;
use crate::{Context, Result, StorageError};

/// Which parts of an order [`SqliteSaleOrderRepository::create_order`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePersistence {
    /// Header and every line item.
    #[default]
    Full,

    /// Header only; line items are returned untouched with id `0`.
    HeaderOnly,
}

/// SQLite-backed sale order repository.
#[derive(Clone)]
pub struct SqliteSaleOrderRepository {
    db: DataAccessor,
    lines: LinePersistence,
}

impl SqliteSaleOrderRepository {
    /// Creates a repository that persists headers and line items.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_line_persistence(pool, LinePersistence::Full)
    }

    /// Creates a repository that only persists document headers.
    pub fn header_only(pool: SqlitePool) -> Self {
        Self::with_line_persistence(pool, LinePersistence::HeaderOnly)
    }

    pub fn with_line_persistence(pool: SqlitePool, lines: LinePersistence) -> Self {
        Self {
            db: DataAccessor::new(pool),
            lines,
        }
    }

    pub fn line_persistence(&self) -> LinePersistence {
        self.lines
    }

    fn row_to_header(row: &SqliteRow) -> Result<SaleOrder> {
        let raw_date: String = row.try_get("date")?;
        let date = parse_date(&raw_date)?;
        let status = DocumentStatus::try_from(row.try_get::<i64, _>("status")?)?;

        let optional_user = |column: &'static str| -> Result<Option<User>> {
            row.try_get::<Option<i64>, _>(column)?
                .map(|id| from_db_id(column, id).map(User::with_id))
                .transpose()
        };

        Ok(SaleOrder {
            document: Document {
                id: from_db_id("sale_order.id", row.try_get("id")?)?,
                number: row.try_get("number")?,
                date,
                status,
                basis_document_id: row
                    .try_get::<Option<i64>, _>("basis_document_id")?
                    .map(|id| from_db_id("basis_document_id", id))
                    .transpose()?,
                company: Company::with_id(from_db_id("company_id", row.try_get("company_id")?)?),
                created_by: optional_user("created_by")?,
                modified_by: optional_user("modified_by")?,
            },
            customer: Customer::with_id(from_db_id("customer_id", row.try_get("customer_id")?)?),
            products: Vec::new(),
        })
    }

    fn row_to_line(row: &SqliteRow) -> Result<SaleOrderProduct> {
        let product_status = ReferenceStatus::try_from(row.try_get::<i64, _>("product_status")?)?;
        let quantity: i64 = row.try_get("quantity")?;

        Ok(SaleOrderProduct {
            id: from_db_id("sale_order_product.id", row.try_get("id")?)?,
            product: Product(Reference {
                id: from_db_id("product_id", row.try_get("product_id")?)?,
                name: row.try_get("product_name")?,
                status: product_status,
            }),
            quantity: u32::try_from(quantity).map_err(|_| StorageError::OutOfRange {
                column: "quantity",
                value: quantity.to_string(),
            })?,
            price: Money::from_cents(row.try_get("price")?),
        })
    }
}

#[async_trait]
impl SaleOrderRepository for SqliteSaleOrderRepository {
    async fn create_order(&self, ctx: &Context, mut order: SaleOrder) -> Result<SaleOrder> {
        let mut db = self.db.executor(ctx).await?;

        let header = &order.document;
        let created_by = header
            .created_by
            .as_ref()
            .map(|user| to_db_id("created_by", user.id))
            .transpose()?;
        let modified_by = header
            .modified_by
            .as_ref()
            .map(|user| to_db_id("modified_by", user.id))
            .transpose()?;
        let basis_document_id = header
            .basis_document_id
            .map(|id| to_db_id("basis_document_id", id))
            .transpose()?;

        let inserted = db
            .execute(
                sqlx::query(
                    r#"
                    INSERT INTO sale_order
                        (number, date, status, customer_id, company_id, basis_document_id, created_by, modified_by)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(header.number.clone())
                .bind(format_date(&header.date))
                .bind(header.status.code())
                .bind(to_db_id("customer_id", order.customer.id)?)
                .bind(to_db_id("company_id", header.company.id)?)
                .bind(basis_document_id)
                .bind(created_by)
                .bind(modified_by),
            )
            .await?;

        order.document.id = from_db_id("sale_order.id", inserted.last_insert_rowid())?;
        tracing::debug!(sale_order_id = order.document.id, "inserted sale order header");

        if self.lines == LinePersistence::HeaderOnly {
            return Ok(order);
        }

        let parent_id = to_db_id("parent_id", order.document.id)?;
        for line in order.products.iter_mut() {
            let inserted = db
                .execute(
                    sqlx::query(
                        r#"
                        INSERT INTO sale_order_product (parent_id, product_id, quantity, price)
                        VALUES (?, ?, ?, ?)
                        "#,
                    )
                    .bind(parent_id)
                    .bind(to_db_id("product_id", line.product.id)?)
                    .bind(i64::from(line.quantity))
                    .bind(line.price.cents()),
                )
                .await?;

            line.id = from_db_id("sale_order_product.id", inserted.last_insert_rowid())?;
        }

        Ok(order)
    }

    async fn get_by_id(&self, ctx: &Context, id: u64) -> Result<Option<SaleOrder>> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };

        let mut db = self.db.executor(ctx).await?;

        let row = db
            .fetch_optional(
                sqlx::query(
                    r#"
                    SELECT id, number, date, status, customer_id, company_id,
                           basis_document_id, created_by, modified_by
                    FROM sale_order
                    WHERE id = ?
                    "#,
                )
                .bind(id),
            )
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut order = Self::row_to_header(&row)?;

        let mut lines = db.fetch(
            sqlx::query(
                r#"
                SELECT
                    sop.id,
                    sop.product_id,
                    sop.quantity,
                    sop.price,
                    p.name AS product_name,
                    p.status AS product_status
                FROM sale_order_product AS sop
                LEFT JOIN product AS p ON p.id = sop.product_id
                WHERE sop.parent_id = ?
                ORDER BY sop.id ASC
                "#,
            )
            .bind(id),
        )?;

        while let Some(row) = lines.try_next().await? {
            order.products.push(Self::row_to_line(&row)?);
        }

        Ok(Some(order))
    }
}
