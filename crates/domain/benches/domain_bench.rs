use std::sync::Arc;

use common::{Customer, Money, SaleOrder, SaleOrderProduct};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{CreateSaleOrder, RandomNumberGenerator, SaleOrderService, SystemTimeGenerator};
use storage::{Context, InMemoryProductRepository, InMemorySaleOrderRepository};

fn order_with_lines(count: u64) -> SaleOrder {
    SaleOrder::new(
        Customer::with_id(1),
        (0..count)
            .map(|i| SaleOrderProduct::new(i % 10 + 1, 1, Money::from_cents(100)))
            .collect(),
    )
}

fn bench_validate_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = SaleOrderService::new(
        InMemorySaleOrderRepository::new(),
        Arc::new(InMemoryProductRepository::with_products(1..=10)),
    );
    let order = order_with_lines(50);
    let ctx = Context::background();

    c.bench_function("domain/validate_order_50_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                service.validate_order(&ctx, &order).await.unwrap();
            });
        });
    });
}

fn bench_create_sale_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("domain/create_sale_order", |b| {
        b.iter(|| {
            rt.block_on(async {
                let service = Arc::new(SaleOrderService::new(
                    InMemorySaleOrderRepository::new(),
                    Arc::new(InMemoryProductRepository::with_products(1..=10)),
                ));
                let use_case = CreateSaleOrder::new(
                    Arc::new(SystemTimeGenerator),
                    Arc::new(RandomNumberGenerator),
                    service,
                );
                use_case
                    .handle(&Context::background(), order_with_lines(5))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_validate_order, bench_create_sale_order);
criterion_main!(benches);
