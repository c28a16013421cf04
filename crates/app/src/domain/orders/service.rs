//! Online orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
        },
        sales::records::SaleUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self.repository.list_orders(&mut tx, status).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_order_items(
        &self,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.repository.list_order_items(&mut tx, order).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn pending_count(&self) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let count = self.repository.pending_count(&mut tx).await?;

        tx.commit().await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_order(&mut tx, &order).await?;

        for item in &order.items {
            let quantity =
                i32::try_from(item.quantity).map_err(|_| OrdersServiceError::InvalidData)?;

            self.repository
                .create_order_item(&mut tx, order.uuid, *item, quantity)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order = %created.uuid,
            total = %created.total,
            items = order.items.len(),
            "online order created"
        );

        Ok(created)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_status(&mut tx, order, status).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn approve_order(&self, order: OrderUuid) -> Result<SaleUuid, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let sale = self
            .repository
            .convert_order_to_sale(&mut tx, order)
            .await
            .map_err(|error| match OrdersServiceError::from(error) {
                OrdersServiceError::InvalidData => OrdersServiceError::NotPending,
                other => other,
            })?;

        tx.commit().await?;

        tracing::info!(%order, %sale, "online order converted to sale");

        Ok(SaleUuid::from_uuid(sale))
    }

    async fn reject_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        self.update_status(order, OrderStatus::Rejected).await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieves orders, newest first, optionally only those in `status`.
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieves the lines of an order with their product code and name.
    async fn list_order_items(
        &self,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, OrdersServiceError>;

    /// Number of orders awaiting review.
    async fn pending_count(&self) -> Result<u64, OrdersServiceError>;

    /// Creates a pending order with its items.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Sets the status of an order.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Converts a pending order into a sale, returning the sale id.
    async fn approve_order(&self, order: OrderUuid) -> Result<SaleUuid, OrdersServiceError>;

    /// Marks an order as rejected.
    async fn reject_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;
}
