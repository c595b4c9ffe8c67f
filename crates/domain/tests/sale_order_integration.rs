//! Integration tests for the sale order use cases.
//!
//! These run the use cases against an in-memory SQLite database inside
//! transactions, the way the HTTP layer does.

use std::sync::Arc;

use chrono::{Local, TimeZone};
use common::{Customer, DocumentStatus, Money, SaleOrder, SaleOrderProduct};
use domain::{
    CreateSaleOrder, DomainError, FixedTimeGenerator, GetSaleOrder, RandomNumberGenerator,
    SaleOrderService, ValidationError,
};
use sqlx::SqlitePool;
use storage::{
    Context, SqliteProductRepository, SqliteSaleOrderRepository, Transactor, connect_in_memory,
    run_migrations,
};

struct Fixture {
    pool: SqlitePool,
    transactor: Transactor,
    create: CreateSaleOrder<SqliteSaleOrderRepository>,
    get: GetSaleOrder<SqliteSaleOrderRepository>,
}

async fn fixture() -> Fixture {
    let pool = connect_in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();
    sqlx::query("INSERT INTO product (id, name, status) VALUES (1, 'Widget', 0), (2, 'Gadget', 0)")
        .execute(&pool)
        .await
        .unwrap();

    let service = Arc::new(SaleOrderService::new(
        SqliteSaleOrderRepository::new(pool.clone()),
        Arc::new(SqliteProductRepository::new(pool.clone())),
    ));
    let now = Local.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).single().unwrap();

    Fixture {
        transactor: Transactor::new(pool.clone()),
        create: CreateSaleOrder::new(
            Arc::new(FixedTimeGenerator(now)),
            Arc::new(RandomNumberGenerator),
            service.clone(),
        ),
        get: GetSaleOrder::new(service),
        pool,
    }
}

async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sale_order")
        .fetch_one(pool)
        .await
        .unwrap()
}

fn sample_order(product_ids: &[u64]) -> SaleOrder {
    SaleOrder::new(
        Customer::with_id(5),
        product_ids
            .iter()
            .map(|&id| SaleOrderProduct::new(id, 2, Money::from_cents(1_000)))
            .collect(),
    )
}

#[tokio::test]
async fn create_and_get_in_transactions() {
    let f = fixture().await;
    let create = &f.create;
    let get = &f.get;

    let created = f
        .transactor
        .run_in_tx(&Context::background(), move |ctx| async move {
            create.handle(&ctx, sample_order(&[1, 2])).await
        })
        .await
        .unwrap();
    assert_eq!(created.id(), 1);
    assert!(created.document.number.starts_with("20240517-0-"));

    let id = created.id();
    let loaded = f
        .transactor
        .run_in_tx(&Context::background(), move |ctx| async move {
            get.handle(&ctx, id).await
        })
        .await
        .unwrap()
        .expect("order should exist");

    assert_eq!(loaded.status(), DocumentStatus::Draft);
    assert_eq!(loaded.document.date, created.document.date);
    assert_eq!(loaded.products.len(), 2);
    assert_eq!(loaded.products[1].product.name, "Gadget");
    assert_eq!(loaded.total().cents(), 4_000);
}

#[tokio::test]
async fn unknown_product_rolls_back() {
    let f = fixture().await;
    let create = &f.create;

    let err = f
        .transactor
        .run_in_tx(&Context::background(), move |ctx| async move {
            create.handle(&ctx, sample_order(&[1, 99])).await
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::UnknownProduct(99))
    );
    assert_eq!(order_count(&f.pool).await, 0);
}

#[tokio::test]
async fn every_status_passes_validation() {
    let f = fixture().await;
    let service = SaleOrderService::without_reference_checks(SqliteSaleOrderRepository::new(
        f.pool.clone(),
    ));

    for status in DocumentStatus::ALL {
        let mut order = sample_order(&[1]);
        order.document.status = status;
        service
            .validate_order(&Context::background(), &order)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn nested_transaction_is_reported_as_storage_error() {
    let f = fixture().await;

    let err = f
        .transactor
        .run_in_tx(&Context::background(), |ctx| {
            let transactor = f.transactor.clone();
            // A unit of work that opens its own transaction.
            async move {
                transactor
                    .run_in_tx(&ctx, |_| async { Ok::<_, DomainError>(()) })
                    .await
            }
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Storage(_)));
}
