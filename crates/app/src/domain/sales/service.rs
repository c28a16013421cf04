//! Sales service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::sales::{
        data::{NewSale, SalesFilter},
        errors::SalesServiceError,
        records::{SaleRecord, SaleTotal},
        repository::PgSalesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSalesService {
    db: Db,
    repository: PgSalesRepository,
}

impl PgSalesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSalesRepository::new(),
        }
    }

    /// Decrements stock for every sold line, each in its own transaction.
    async fn decrement_stock(&self, lines: &[(String, i32)]) {
        for (code, quantity) in lines {
            let result = async {
                let mut tx = self.db.begin_transaction().await?;

                self.repository
                    .update_product_stock(&mut tx, code, *quantity)
                    .await?;

                tx.commit().await
            }
            .await;

            if let Err(error) = result {
                tracing::warn!(%error, code, quantity, "failed to decrement stock after sale");
            }
        }
    }
}

#[async_trait]
impl SalesService for PgSalesService {
    async fn list_sales(&self, filter: SalesFilter) -> Result<Vec<SaleRecord>, SalesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let sales = self.repository.list_sales(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(sales)
    }

    async fn process_sale(&self, sale: NewSale) -> Result<SaleRecord, SalesServiceError> {
        if sale.items.is_empty() {
            return Err(SalesServiceError::EmptySale);
        }

        let lines = sale
            .items
            .iter()
            .map(|line| {
                i32::try_from(line.quantity)
                    .map(|quantity| (line.code.clone(), quantity))
                    .map_err(|_| SalesServiceError::InvalidData)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_sale(&mut tx, sale.uuid, sale.total(), &sale.items)
            .await?;

        for (line, (_, quantity)) in sale.items.iter().zip(&lines) {
            self.repository
                .create_sale_item(&mut tx, sale.uuid, line, *quantity)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            sale = %created.uuid,
            total = %created.total,
            lines = created.items.len(),
            "sale recorded"
        );

        self.decrement_stock(&lines).await;

        Ok(created)
    }

    async fn sales_between(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<SaleTotal>, SalesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let totals = self.repository.sales_between(&mut tx, start, end).await?;

        tx.commit().await?;

        Ok(totals)
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Retrieves sales inside `filter`, newest first.
    async fn list_sales(&self, filter: SalesFilter) -> Result<Vec<SaleRecord>, SalesServiceError>;

    /// Records a sale with its lines, then decrements stock for each line.
    ///
    /// Stock decrement failures are logged and do not fail the recorded sale.
    async fn process_sale(&self, sale: NewSale) -> Result<SaleRecord, SalesServiceError>;

    /// Totals of the sales made in `start..end`.
    async fn sales_between(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<SaleTotal>, SalesServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::Decimal;
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{products::ProductsService, sales::records::SaleLine},
        test::{TestContext, fixtures::new_product},
    };

    use super::*;

    fn line(code: &str, name: &str, price: Decimal, quantity: u32) -> SaleLine {
        SaleLine {
            code: code.to_string(),
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn process_sale_records_lines_and_decrements_stock() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(new_product("W-1", "Widget"))
            .await?;

        let sale = ctx
            .sales
            .process_sale(NewSale::new(vec![line(
                "W-1",
                "Widget",
                Decimal::new(1999, 2),
                2,
            )]))
            .await?;

        assert_eq!(sale.total, Decimal::new(3998, 2));
        assert_eq!(sale.items.len(), 1);

        let item_rows: i64 = query_scalar("SELECT COUNT(*) FROM sale_items WHERE sale_id = $1")
            .bind(sale.uuid.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        let product = ctx.products.find_by_code("W-1").await?;

        assert_eq!(item_rows, 1);
        assert_eq!(product.map(|product| product.stock), Some(3));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn unknown_code_still_records_sale() -> TestResult {
        let ctx = TestContext::new().await;

        let sale = ctx
            .sales
            .process_sale(NewSale::new(vec![line("GONE", "Gone", Decimal::ONE, 1)]))
            .await?;

        let listed = ctx.sales.list_sales(SalesFilter::default()).await?;

        assert_eq!(listed.first().map(|sale| sale.uuid), Some(sale.uuid));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn empty_sale_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.sales.process_sale(NewSale::new(Vec::new())).await;

        assert!(
            matches!(result, Err(SalesServiceError::EmptySale)),
            "expected EmptySale, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn sales_between_is_half_open() -> TestResult {
        let ctx = TestContext::new().await;

        let sale = ctx
            .sales
            .process_sale(NewSale::new(vec![line("X-1", "Thing", Decimal::TEN, 1)]))
            .await?;

        let before = sale.created_at.checked_sub(SignedDuration::from_secs(60))?;
        let after = sale.created_at.checked_add(SignedDuration::from_secs(1))?;

        let including = ctx.sales.sales_between(before, after).await?;
        let excluding = ctx.sales.sales_between(before, sale.created_at).await?;

        assert_eq!(including.len(), 1);
        assert!(excluding.is_empty());

        Ok(())
    }
}
