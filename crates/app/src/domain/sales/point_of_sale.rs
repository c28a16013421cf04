//! Counter sales.
//!
//! Products are scanned by code into an in-memory cart, which is turned into a sale at
//! checkout. The counter cart is never persisted.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;
use ventafacil::{cart::CartState, products::ProductId};

use crate::{
    domain::{
        carts::{CartService, CartServiceError},
        products::{ProductsService, ProductsServiceError, records::ProductRecord},
        sales::{SalesService, data::NewSale, errors::SalesServiceError, records::SaleRecord},
    },
    notifications::Notifier,
    storage::MemoryStore,
};

#[derive(Debug, Error)]
pub enum PointOfSaleError {
    #[error("no product with code {0}")]
    ProductNotFound(String),

    #[error("the cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Cart(#[from] CartServiceError),

    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Sales(#[from] SalesServiceError),
}

pub struct PointOfSale {
    products: Arc<dyn ProductsService>,
    sales: Arc<dyn SalesService>,
    notifier: Arc<dyn Notifier>,
    cart: CartService,
    codes: FxHashMap<ProductId, String>,
}

impl PointOfSale {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        sales: Arc<dyn SalesService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cart: CartService::new(Arc::new(MemoryStore::new()), Arc::clone(&notifier)),
            products,
            sales,
            notifier,
            codes: FxHashMap::default(),
        }
    }

    /// Current counter cart.
    #[must_use]
    pub fn cart(&self) -> &CartState {
        self.cart.cart()
    }

    /// Looks up `code` and adds one unit of the product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`PointOfSaleError::ProductNotFound`] for an unknown code, and the cart's
    /// stock errors when nothing more can be sold.
    pub async fn scan(&mut self, code: &str) -> Result<ProductRecord, PointOfSaleError> {
        let code = code.trim();

        let product = match self.products.find_by_code(code).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                let error = PointOfSaleError::ProductNotFound(code.to_string());
                self.notifier.error(&error.to_string());

                return Err(error);
            }
            Err(error) => {
                tracing::error!(%error, code, "failed to look up scanned product");
                self.notifier.error("failed to look up product");

                return Err(error.into());
            }
        };

        self.cart.add_to_cart(&product)?;
        self.codes.insert(product.id, product.code.clone());

        Ok(product)
    }

    /// Drops the line for `id` from the counter cart.
    pub fn remove(&mut self, id: ProductId) {
        self.cart.remove_from_cart(id);
        self.codes.remove(&id);
    }

    /// Records the cart as a sale and empties the cart.
    ///
    /// # Errors
    ///
    /// Returns [`PointOfSaleError::EmptyCart`] when nothing was scanned, or the backend
    /// error, in which case the cart is kept.
    pub async fn checkout(&mut self) -> Result<SaleRecord, PointOfSaleError> {
        if self.cart.cart().is_empty() {
            self.notifier.error("the cart is empty");

            return Err(PointOfSaleError::EmptyCart);
        }

        let sale = NewSale::from_cart(self.cart.cart(), &self.codes)?;

        match self.sales.process_sale(sale).await {
            Ok(created) => {
                self.cart.clear_cart();
                self.codes.clear();

                self.notifier
                    .success(&format!("sale completed for {}", created.total));

                Ok(created)
            }
            Err(error) => {
                tracing::error!(%error, "failed to record counter sale");
                self.notifier
                    .error(&format!("failed to process sale: {error}"));

                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{products::MockProductsService, sales::MockSalesService},
        notifications::MockNotifier,
        test::fixtures::product,
    };

    use super::*;

    fn quiet_notifier() -> Arc<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_success().return_const(());
        notifier.expect_error().return_const(());

        Arc::new(notifier)
    }

    fn catalog() -> MockProductsService {
        let mut products = MockProductsService::new();
        products
            .expect_find_by_code()
            .withf(|code| code == "W-1")
            .returning(|_| Ok(Some(product(1, "W-1", "Widget", 2))));
        products
            .expect_find_by_code()
            .withf(|code| code == "S-1")
            .returning(|_| Ok(Some(product(2, "S-1", "Soap", 0))));
        products
            .expect_find_by_code()
            .returning(|_| Ok(None));

        products
    }

    #[tokio::test]
    async fn scanning_builds_cart_by_code() -> TestResult {
        let mut pos = PointOfSale::new(
            Arc::new(catalog()),
            Arc::new(MockSalesService::new()),
            quiet_notifier(),
        );

        pos.scan("W-1").await?;
        pos.scan(" W-1 ").await?;

        assert_eq!(pos.cart().quantity_of(ProductId::new(1)), 2);
        assert_eq!(pos.cart().total(), Decimal::new(3998, 2));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_code_notifies() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_error()
            .withf(|message| message == "no product with code NOPE")
            .times(1)
            .return_const(());

        let mut pos = PointOfSale::new(
            Arc::new(catalog()),
            Arc::new(MockSalesService::new()),
            Arc::new(notifier),
        );

        let result = pos.scan("NOPE").await;

        assert!(
            matches!(result, Err(PointOfSaleError::ProductNotFound(ref code)) if code == "NOPE"),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn scanning_is_bounded_by_stock() -> TestResult {
        let mut pos = PointOfSale::new(
            Arc::new(catalog()),
            Arc::new(MockSalesService::new()),
            quiet_notifier(),
        );

        let soap = pos.scan("S-1").await;

        pos.scan("W-1").await?;
        pos.scan("W-1").await?;
        let third = pos.scan("W-1").await;

        assert!(matches!(
            soap,
            Err(PointOfSaleError::Cart(CartServiceError::OutOfStock { .. }))
        ));
        assert!(matches!(
            third,
            Err(PointOfSaleError::Cart(CartServiceError::InsufficientStock { available: 2, .. }))
        ));
        assert_eq!(pos.cart().item_count(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_records_sale_and_empties_cart() -> TestResult {
        let mut sales = MockSalesService::new();
        sales
            .expect_process_sale()
            .withf(|sale| {
                sale.items.len() == 1
                    && sale.items[0].code == "W-1"
                    && sale.items[0].quantity == 2
                    && sale.total() == Decimal::new(3998, 2)
            })
            .times(1)
            .returning(|sale| {
                Ok(SaleRecord {
                    uuid: sale.uuid,
                    total: sale.total(),
                    items: sale.items,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut pos = PointOfSale::new(Arc::new(catalog()), Arc::new(sales), quiet_notifier());
        pos.scan("W-1").await?;
        pos.scan("W-1").await?;

        let sale = pos.checkout().await?;

        assert_eq!(sale.total, Decimal::new(3998, 2));
        assert!(pos.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_checkout_keeps_cart() -> TestResult {
        let mut sales = MockSalesService::new();
        sales
            .expect_process_sale()
            .returning(|_| Err(SalesServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut pos = PointOfSale::new(Arc::new(catalog()), Arc::new(sales), quiet_notifier());
        pos.scan("W-1").await?;

        let result = pos.checkout().await;

        assert!(matches!(result, Err(PointOfSaleError::Sales(_))));
        assert_eq!(pos.cart().item_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn empty_checkout_is_rejected() {
        let mut pos = PointOfSale::new(
            Arc::new(MockProductsService::new()),
            Arc::new(MockSalesService::new()),
            quiet_notifier(),
        );

        assert!(matches!(pos.checkout().await, Err(PointOfSaleError::EmptyCart)));
    }
}
