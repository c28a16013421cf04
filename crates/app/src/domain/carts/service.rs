//! Cart service.
//!
//! Owns the live cart, writes every change through to a [`KeyValueStore`] and reports
//! user-visible outcomes through a [`Notifier`].

use std::sync::Arc;

use ventafacil::{
    cart::{CartAction, CartState, reduce},
    products::ProductId,
};

use crate::{
    domain::{carts::errors::CartServiceError, products::records::ProductRecord},
    notifications::Notifier,
    storage::KeyValueStore,
};

/// Key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "ventafacil_cart";

pub struct CartService {
    state: CartState,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
}

impl CartService {
    /// Creates a service with an empty cart. Call [`CartService::initialize`] to restore
    /// the persisted one.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: CartState::new(),
            store,
            notifier,
        }
    }

    /// Restores the persisted cart, if any. Unreadable data leaves the cart empty.
    pub fn initialize(&mut self) {
        let blob = match self.store.get(CART_STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(%error, "failed to read persisted cart");
                return;
            }
        };

        match serde_json::from_str::<CartState>(&blob) {
            Ok(persisted) => {
                self.dispatch(CartAction::Load(persisted));

                tracing::debug!(
                    lines = self.state.len(),
                    total = %self.state.total(),
                    "restored persisted cart"
                );
            }
            Err(error) => {
                tracing::warn!(%error, "discarding unreadable persisted cart");
            }
        }
    }

    /// Adds one unit of `product`, checking stock first.
    ///
    /// # Errors
    ///
    /// Returns [`CartServiceError::OutOfStock`] when nothing is left to sell and
    /// [`CartServiceError::InsufficientStock`] when the cart already holds every unit.
    pub fn add_to_cart(&mut self, product: &ProductRecord) -> Result<(), CartServiceError> {
        if !product.in_stock() {
            return Err(self.reject(CartServiceError::OutOfStock {
                product: product.name.clone(),
            }));
        }

        let available = available_units(product);

        if self.state.quantity_of(product.id) >= available {
            return Err(self.reject(CartServiceError::InsufficientStock {
                product: product.name.clone(),
                available,
            }));
        }

        self.dispatch(CartAction::Add(product.snapshot()));
        self.persist();

        self.notifier
            .success(&format!("{} added to cart", product.name));

        Ok(())
    }

    /// Removes the line for `id`. Unknown ids are ignored.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        let Some(name) = self.state.item(id).map(|item| item.name().to_string()) else {
            return;
        };

        self.dispatch(CartAction::Remove(id));
        self.persist();

        self.notifier.success(&format!("{name} removed from cart"));
    }

    /// Sets the quantity of the line for `id`; zero or less removes it.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        self.dispatch(CartAction::SetQuantity(id, quantity));
        self.persist();
    }

    /// Moves the quantity of `product` by `delta`, bounded by its stock. Products that
    /// are not in the cart are ignored; use [`CartService::add_to_cart`] for those.
    ///
    /// # Errors
    ///
    /// Returns [`CartServiceError::InsufficientStock`] when the new quantity exceeds the
    /// available stock. The cart is unchanged.
    pub fn change_quantity(
        &mut self,
        product: &ProductRecord,
        delta: i64,
    ) -> Result<(), CartServiceError> {
        if !self.state.contains(product.id) {
            return Ok(());
        }

        let quantity = i64::from(self.state.quantity_of(product.id)).saturating_add(delta);

        if quantity <= 0 {
            self.update_quantity(product.id, 0);

            return Ok(());
        }

        let available = available_units(product);

        if quantity > i64::from(available) {
            return Err(self.reject(CartServiceError::InsufficientStock {
                product: product.name.clone(),
                available,
            }));
        }

        self.update_quantity(product.id, quantity);

        Ok(())
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::Clear);
        self.persist();

        self.notifier.success("cart emptied");
    }

    /// Current cart.
    #[must_use]
    pub fn cart(&self) -> &CartState {
        &self.state
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// Whether a line exists for `id`.
    #[must_use]
    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.state.contains(id)
    }

    /// Quantity of the line for `id`, zero when absent.
    #[must_use]
    pub fn item_quantity(&self, id: ProductId) -> u32 {
        self.state.quantity_of(id)
    }

    fn dispatch(&mut self, action: CartAction) {
        let state = std::mem::take(&mut self.state);

        self.state = reduce(state, action);
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(error) => {
                tracing::error!(%error, "failed to serialize cart");
                return;
            }
        };

        if let Err(error) = self.store.set(CART_STORAGE_KEY, &blob) {
            tracing::error!(%error, "failed to persist cart");
        }
    }

    fn reject(&self, error: CartServiceError) -> CartServiceError {
        tracing::debug!(%error, "cart change rejected");
        self.notifier.error(&error.to_string());

        error
    }
}

fn available_units(product: &ProductRecord) -> u32 {
    u32::try_from(product.stock).unwrap_or(0)
}
