//! Product catalog cache.
//!
//! Keeps the product list in memory and patches it with the rows the backend returns,
//! instead of refetching after every write.

use std::sync::Arc;

use crate::{
    domain::products::{
        ProductsService,
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductId, ProductRecord},
    },
    notifications::Notifier,
};

/// Stock level below which a product counts as running low.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

pub struct ProductCatalog {
    service: Arc<dyn ProductsService>,
    notifier: Arc<dyn Notifier>,
    products: Vec<ProductRecord>,
}

impl ProductCatalog {
    #[must_use]
    pub fn new(service: Arc<dyn ProductsService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            products: Vec::new(),
        }
    }

    /// Cached products, in the order the backend listed them.
    #[must_use]
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Cached product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&ProductRecord> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Reloads the whole list.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previous list is kept.
    pub async fn refresh(&mut self) -> Result<&[ProductRecord], ProductsServiceError> {
        match self.service.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "product catalog refreshed");
                self.products = products;

                Ok(&self.products)
            }
            Err(error) => Err(self.report("failed to load products", error)),
        }
    }

    /// Creates a product and appends the stored row.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the cache is unchanged.
    pub async fn create(
        &mut self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        match self.service.create_product(product).await {
            Ok(created) => {
                self.notifier
                    .success(&format!("product {} created", created.name));
                self.products.push(created.clone());

                Ok(created)
            }
            Err(error) => Err(self.report("failed to create product", error)),
        }
    }

    /// Updates a product and replaces the cached row with the stored one.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the cache is unchanged.
    pub async fn update(
        &mut self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        match self.service.update_product(id, update).await {
            Ok(updated) => {
                self.notifier
                    .success(&format!("product {} updated", updated.name));

                if let Some(cached) = self.products.iter_mut().find(|product| product.id == id) {
                    *cached = updated.clone();
                }

                Ok(updated)
            }
            Err(error) => Err(self.report("failed to update product", error)),
        }
    }

    /// Deletes a product, dropping it from the cache once the backend confirms.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the cache is unchanged.
    pub async fn delete(&mut self, id: ProductId) -> Result<(), ProductsServiceError> {
        match self.service.delete_product(id).await {
            Ok(()) => {
                self.notifier.success("product deleted");
                self.products.retain(|product| product.id != id);

                Ok(())
            }
            Err(error) => Err(self.report("failed to delete product", error)),
        }
    }

    /// Looks a product up by scan code on the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend error. An unknown code is `Ok(None)`.
    pub async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<ProductRecord>, ProductsServiceError> {
        self.service.find_by_code(code).await.inspect_err(|error| {
            tracing::error!(%error, code, "failed to look up product by code");
        })
    }

    /// Cached products whose name or category contains `term`, ignoring case.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&ProductRecord> {
        let term = term.to_lowercase();

        self.products
            .iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&term)
                    || product.category.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Cached products with fewer than `threshold` units left, lowest stock first.
    #[must_use]
    pub fn low_stock(&self, threshold: i32) -> Vec<&ProductRecord> {
        let mut products: Vec<_> = self
            .products
            .iter()
            .filter(|product| product.stock < threshold)
            .collect();

        products.sort_by_key(|product| product.stock);

        products
    }

    fn report(&self, context: &str, error: ProductsServiceError) -> ProductsServiceError {
        tracing::error!(%error, "{context}");
        self.notifier.error(&format!("{context}: {error}"));

        error
    }
}
