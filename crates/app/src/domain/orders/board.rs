//! Orders board.
//!
//! Cached order list and pending-order count for the admin view. Local writes and
//! real-time [`OrderChange`]s both patch the cache in place.

use std::sync::Arc;

use crate::{
    domain::{
        orders::{
            OrdersService,
            changes::OrderChange,
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderStatus, OrderUuid},
        },
        sales::records::SaleUuid,
    },
    notifications::Notifier,
};

pub struct OrdersBoard {
    service: Arc<dyn OrdersService>,
    notifier: Arc<dyn Notifier>,
    orders: Vec<OrderRecord>,
    filter: Option<OrderStatus>,
    pending_count: u64,
}

impl OrdersBoard {
    #[must_use]
    pub fn new(service: Arc<dyn OrdersService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            orders: Vec::new(),
            filter: None,
            pending_count: 0,
        }
    }

    /// Cached orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    #[must_use]
    pub fn pending_count(&self) -> u64 {
        self.pending_count
    }

    /// Reloads the orders in `filter`. An unfiltered load also recounts pending orders.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previous list is kept.
    pub async fn refresh(
        &mut self,
        filter: Option<OrderStatus>,
    ) -> Result<&[OrderRecord], OrdersServiceError> {
        match self.service.list_orders(filter).await {
            Ok(orders) => {
                if filter.is_none() {
                    self.pending_count =
                        orders.iter().filter(|order| order.status.is_pending()).count() as u64;
                }

                self.orders = orders;
                self.filter = filter;

                Ok(&self.orders)
            }
            Err(error) => {
                tracing::error!(%error, "failed to load orders");
                self.notifier.error("failed to load orders");

                Err(error)
            }
        }
    }

    /// Re-reads the pending count. A failed read resets it to zero.
    pub async fn refresh_pending_count(&mut self) -> u64 {
        self.pending_count = match self.service.pending_count().await {
            Ok(count) => count,
            Err(error) => {
                tracing::error!(%error, "failed to count pending orders");
                0
            }
        };

        self.pending_count
    }

    /// Creates a pending order and puts it at the head of the list.
    ///
    /// # Errors
    ///
    /// Returns the backend error, notified to the user; the cache is unchanged.
    pub async fn create(&mut self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        match self.service.create_order(order).await {
            Ok(created) => {
                if !self.is_cached(created.uuid) {
                    self.orders.insert(0, created.clone());
                    self.pending_count += 1;
                }

                Ok(created)
            }
            Err(error) => {
                tracing::error!(%error, "failed to create order");
                self.notifier.error("failed to create order");

                Err(error)
            }
        }
    }

    /// Sets the status of an order and patches the cached row. The pending count only
    /// moves when a cached pending order leaves the pending state.
    ///
    /// # Errors
    ///
    /// Returns the backend error, notified to the user; the cache is unchanged.
    pub async fn update_status(
        &mut self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        match self.service.update_status(order, status).await {
            Ok(updated) => {
                let was_pending = self.cached_status(order).is_some_and(OrderStatus::is_pending);

                self.replace(updated.clone());

                if was_pending && !status.is_pending() {
                    self.pending_count = self.pending_count.saturating_sub(1);
                }

                Ok(updated)
            }
            Err(error) => {
                tracing::error!(%error, %order, %status, "failed to update order status");
                self.notifier.error("failed to update order status");

                Err(error)
            }
        }
    }

    /// Converts a pending order into a sale.
    ///
    /// # Errors
    ///
    /// Returns the backend error, notified to the user; the cache is unchanged.
    pub async fn approve(&mut self, order: OrderUuid) -> Result<SaleUuid, OrdersServiceError> {
        match self.service.approve_order(order).await {
            Ok(sale) => {
                self.mark(order, OrderStatus::Approved);
                self.notifier.success("order approved and converted to a sale");

                Ok(sale)
            }
            Err(error) => {
                tracing::error!(%error, %order, "failed to approve order");
                self.notifier
                    .error(&format!("failed to approve order: {error}"));

                Err(error)
            }
        }
    }

    /// Rejects an order.
    ///
    /// # Errors
    ///
    /// Returns the backend error, notified to the user; the cache is unchanged.
    pub async fn reject(&mut self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        match self.service.reject_order(order).await {
            Ok(rejected) => {
                let was_pending = self.cached_status(order).is_some_and(OrderStatus::is_pending);

                self.replace(rejected.clone());

                if was_pending {
                    self.pending_count = self.pending_count.saturating_sub(1);
                }

                self.notifier.success("order rejected");

                Ok(rejected)
            }
            Err(error) => {
                tracing::error!(%error, %order, "failed to reject order");
                self.notifier.error("failed to reject order");

                Err(error)
            }
        }
    }

    /// Applies a real-time change to the cache.
    pub async fn apply_change(&mut self, change: OrderChange) {
        tracing::debug!(?change, "applying order change");

        match change {
            OrderChange::Inserted(order) => {
                if self.is_cached(order.uuid) {
                    return;
                }

                if order.status.is_pending() {
                    self.pending_count += 1;
                }

                if self.filter.is_none_or(|filter| filter == order.status) {
                    self.orders.insert(0, order);
                }
            }
            OrderChange::Updated(order) => {
                self.replace(order);
                self.refresh_pending_count().await;
            }
            OrderChange::Deleted(order) => {
                self.orders.retain(|cached| cached.uuid != order.uuid);

                if order.status.is_pending() {
                    self.pending_count = self.pending_count.saturating_sub(1);
                }
            }
        }
    }

    fn is_cached(&self, order: OrderUuid) -> bool {
        self.orders.iter().any(|cached| cached.uuid == order)
    }

    fn cached_status(&self, order: OrderUuid) -> Option<OrderStatus> {
        self.orders
            .iter()
            .find(|cached| cached.uuid == order)
            .map(|cached| cached.status)
    }

    fn replace(&mut self, order: OrderRecord) {
        if let Some(cached) = self.orders.iter_mut().find(|cached| cached.uuid == order.uuid) {
            *cached = order;
        }
    }

    fn mark(&mut self, order: OrderUuid, status: OrderStatus) {
        if let Some(cached) = self.orders.iter_mut().find(|cached| cached.uuid == order) {
            if cached.status.is_pending() && !status.is_pending() {
                self.pending_count = self.pending_count.saturating_sub(1);
            }

            cached.status = status;
        }
    }
}
