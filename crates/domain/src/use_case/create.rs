use std::sync::Arc;

use common::{DocumentStatus, SaleOrder};
use storage::{Context, SaleOrderRepository};

use crate::error::DomainError;
use crate::generators::{NumberGenerator, TimeGenerator};
use crate::sale_order::SaleOrderService;

/// Stamps a new order's date, number and status, then creates it.
pub struct CreateSaleOrder<R: SaleOrderRepository> {
    clock: Arc<dyn TimeGenerator>,
    numbers: Arc<dyn NumberGenerator>,
    service: Arc<SaleOrderService<R>>,
}

impl<R: SaleOrderRepository> CreateSaleOrder<R> {
    pub fn new(
        clock: Arc<dyn TimeGenerator>,
        numbers: Arc<dyn NumberGenerator>,
        service: Arc<SaleOrderService<R>>,
    ) -> Self {
        Self {
            clock,
            numbers,
            service,
        }
    }

    /// Overwrites any caller-supplied date, number and status.
    #[tracing::instrument(skip(self, ctx, order))]
    pub async fn handle(
        &self,
        ctx: &Context,
        mut order: SaleOrder,
    ) -> Result<SaleOrder, DomainError> {
        let date = self.clock.now();
        order.document.number = self.numbers.generate(&date, &order.document.company);
        order.document.date = date;
        order.document.status = DocumentStatus::Draft;

        self.service.create_order(ctx, order).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use common::{Company, Customer, Money, SaleOrderProduct};
    use storage::{InMemoryProductRepository, InMemorySaleOrderRepository};

    use super::*;
    use crate::generators::FixedTimeGenerator;

    struct StaticNumber;

    impl NumberGenerator for StaticNumber {
        fn generate(&self, date: &chrono::DateTime<Local>, company: &Company) -> String {
            format!("{}/{}", date.format("%Y%m%d"), company.id)
        }
    }

    #[tokio::test]
    async fn stamps_date_number_and_draft_status() {
        let now = Local.with_ymd_and_hms(2024, 5, 17, 10, 30, 0).single().unwrap();
        let products = InMemoryProductRepository::with_products([1]);
        let service = Arc::new(SaleOrderService::new(
            InMemorySaleOrderRepository::new(),
            Arc::new(products),
        ));
        let use_case = CreateSaleOrder::new(
            Arc::new(FixedTimeGenerator(now)),
            Arc::new(StaticNumber),
            service,
        );

        let mut order = SaleOrder::new(
            Customer::with_id(3),
            vec![SaleOrderProduct::new(1, 2, Money::from_cents(250))],
        );
        order.document.number = "caller supplied".to_string();
        order.document.status = DocumentStatus::Posted;
        order.document.company = Company::with_id(8);

        let created = use_case.handle(&Context::background(), order).await.unwrap();

        assert_eq!(created.id(), 1);
        assert_eq!(created.document.date, now);
        assert_eq!(created.document.number, "20240517/8");
        assert_eq!(created.status(), DocumentStatus::Draft);
    }
}
