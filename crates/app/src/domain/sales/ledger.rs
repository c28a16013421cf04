//! Sales ledger cache.

use std::sync::Arc;

use jiff::Zoned;

use crate::{
    domain::sales::{
        SalesService,
        data::{NewSale, SalesFilter},
        errors::SalesServiceError,
        records::SaleRecord,
        report::SalesReport,
        stats::{SalesPeriod, SalesStats},
    },
    notifications::Notifier,
};

pub struct SalesLedger {
    service: Arc<dyn SalesService>,
    notifier: Arc<dyn Notifier>,
    sales: Vec<SaleRecord>,
}

impl SalesLedger {
    #[must_use]
    pub fn new(service: Arc<dyn SalesService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            sales: Vec::new(),
        }
    }

    /// Cached sales, newest first.
    #[must_use]
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Report over the cached sales.
    #[must_use]
    pub fn report(&self) -> SalesReport<'_> {
        SalesReport::new(&self.sales)
    }

    /// Reloads the sales inside `filter`.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previous list is kept.
    pub async fn refresh(
        &mut self,
        filter: SalesFilter,
    ) -> Result<&[SaleRecord], SalesServiceError> {
        match self.service.list_sales(filter).await {
            Ok(sales) => {
                self.sales = sales;

                Ok(&self.sales)
            }
            Err(error) => {
                tracing::error!(%error, "failed to load sales");
                self.notifier.error("failed to load sales");

                Err(error)
            }
        }
    }

    /// Records a sale and puts it at the head of the cache.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the cache is unchanged.
    pub async fn process(&mut self, sale: NewSale) -> Result<SaleRecord, SalesServiceError> {
        match self.service.process_sale(sale).await {
            Ok(created) => {
                self.sales.insert(0, created.clone());

                Ok(created)
            }
            Err(error) => {
                tracing::error!(%error, "failed to process sale");
                self.notifier.error(&format!("failed to process sale: {error}"));

                Err(error)
            }
        }
    }

    /// Figures for `period` as of now, in the system time zone.
    pub async fn stats(&self, period: SalesPeriod) -> SalesStats {
        self.stats_at(period, &Zoned::now()).await
    }

    /// Figures for `period` relative to `now`. Failures yield zeroed figures.
    pub async fn stats_at(&self, period: SalesPeriod, now: &Zoned) -> SalesStats {
        let window = match period.window(now) {
            Ok(window) => window,
            Err(error) => {
                tracing::error!(%error, %period, "failed to resolve sales period");
                return SalesStats::default();
            }
        };

        match self.service.sales_between(window.start, window.end).await {
            Ok(totals) => SalesStats::from_sales(&totals),
            Err(error) => {
                tracing::error!(%error, %period, "failed to load sales statistics");
                SalesStats::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{
        Timestamp,
        civil::date,
        tz::{TimeZone, offset},
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{
        domain::sales::{
            MockSalesService, TOP_PRODUCTS,
            records::{SaleLine, SaleTotal, SaleUuid},
        },
        notifications::MockNotifier,
    };

    use super::*;

    fn sale(total: Decimal) -> SaleRecord {
        SaleRecord {
            uuid: SaleUuid::from_uuid(Uuid::now_v7()),
            total,
            items: vec![SaleLine {
                code: "W-1".to_string(),
                name: "Widget".to_string(),
                price: total,
                quantity: 1,
            }],
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn process_prepends_new_sale() -> TestResult {
        let mut service = MockSalesService::new();
        service
            .expect_list_sales()
            .returning(|_| Ok(vec![sale(Decimal::ONE)]));
        service
            .expect_process_sale()
            .returning(|_| Ok(sale(Decimal::TEN)));

        let mut ledger = SalesLedger::new(Arc::new(service), Arc::new(MockNotifier::new()));
        ledger.refresh(SalesFilter::default()).await?;

        let created = ledger.process(NewSale::new(Vec::new())).await?;

        assert_eq!(ledger.sales().len(), 2);
        assert_eq!(ledger.sales().first(), Some(&created));

        Ok(())
    }

    #[tokio::test]
    async fn report_covers_the_loaded_period() -> TestResult {
        let now = date(2025, 3, 14)
            .at(15, 30, 0, 0)
            .to_zoned(TimeZone::fixed(offset(-6)))?;
        let window = SalesPeriod::Week.window(&now)?;

        let mut service = MockSalesService::new();
        service
            .expect_list_sales()
            .withf(move |filter| *filter == SalesFilter::from(window))
            .returning(|_| Ok(vec![sale(Decimal::TEN), sale(Decimal::ONE)]));

        let mut ledger = SalesLedger::new(Arc::new(service), Arc::new(MockNotifier::new()));
        ledger.refresh(window.into()).await?;

        let top = ledger.report().top_products(TOP_PRODUCTS);

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Widget");
        assert_eq!(top[0].quantity, 2);
        assert_eq!(top[0].revenue, Decimal::new(11, 0));

        Ok(())
    }

    #[tokio::test]
    async fn failed_process_notifies_and_keeps_cache() {
        let mut service = MockSalesService::new();
        service
            .expect_process_sale()
            .returning(|_| Err(SalesServiceError::EmptySale));

        let mut notifier = MockNotifier::new();
        notifier.expect_error().times(1).return_const(());

        let mut ledger = SalesLedger::new(Arc::new(service), Arc::new(notifier));

        let result = ledger.process(NewSale::new(Vec::new())).await;

        assert!(result.is_err(), "expected process to fail");
        assert!(ledger.sales().is_empty());
    }

    #[tokio::test]
    async fn stats_query_today_window() -> TestResult {
        let now = date(2025, 3, 14)
            .at(15, 30, 0, 0)
            .to_zoned(TimeZone::fixed(offset(-6)))?;
        let window = SalesPeriod::Today.window(&now)?;

        let mut service = MockSalesService::new();
        service
            .expect_sales_between()
            .withf(move |start, end| *start == window.start && *end == window.end)
            .returning(|start, _| {
                Ok(vec![
                    SaleTotal {
                        total: Decimal::new(1000, 2),
                        created_at: start,
                    },
                    SaleTotal {
                        total: Decimal::new(2000, 2),
                        created_at: start,
                    },
                ])
            });

        let ledger = SalesLedger::new(Arc::new(service), Arc::new(MockNotifier::new()));

        let stats = ledger.stats_at(SalesPeriod::Today, &now).await;

        assert_eq!(stats.transactions, 2);
        assert_eq!(stats.total_sales, Decimal::new(3000, 2));
        assert_eq!(stats.average_ticket, Decimal::new(1500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn stats_degrade_to_zero_on_failure() {
        let mut service = MockSalesService::new();
        service
            .expect_sales_between()
            .returning(|_, _| Err(SalesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let ledger = SalesLedger::new(Arc::new(service), Arc::new(MockNotifier::new()));

        assert_eq!(ledger.stats(SalesPeriod::Month).await, SalesStats::default());
    }
}
