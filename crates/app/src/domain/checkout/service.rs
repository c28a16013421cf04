//! Storefront checkout.

use std::sync::Arc;

use crate::{
    domain::{
        carts::CartService,
        checkout::{details::CustomerDetails, errors::CheckoutError},
        orders::{OrdersService, data::NewOrder, records::OrderRecord},
    },
    notifications::Notifier,
};

/// Turns a customer's cart into a pending online order.
pub struct Checkout {
    orders: Arc<dyn OrdersService>,
    notifier: Arc<dyn Notifier>,
}

impl Checkout {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersService>, notifier: Arc<dyn Notifier>) -> Self {
        Self { orders, notifier }
    }

    /// Places an order for the contents of `cart` and empties the cart once the order is
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is sent, or the backend error. The cart
    /// is untouched in both cases.
    pub async fn place_order(
        &self,
        cart: &mut CartService,
        details: CustomerDetails,
    ) -> Result<OrderRecord, CheckoutError> {
        if let Err(error) = details.validate() {
            self.notifier.error(&error.to_string());

            return Err(error);
        }

        if cart.cart().is_empty() {
            let error = CheckoutError::EmptyCart;
            self.notifier.error(&error.to_string());

            return Err(error);
        }

        let order = NewOrder::from_cart(cart.cart(), details.into_customer());

        match self.orders.create_order(order).await {
            Ok(order) => {
                tracing::info!(order = %order.uuid, total = %order.total, "order placed");

                cart.clear_cart();
                self.notifier.success("order placed");

                Ok(order)
            }
            Err(error) => {
                tracing::error!(%error, "failed to place order");
                self.notifier
                    .error("failed to process the order, please try again");

                Err(error.into())
            }
        }
    }
}
