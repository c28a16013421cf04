//! Cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::{cart_total, line_total},
    products::{CartProduct, ProductId},
};

mod action;

pub use action::{CartAction, reduce};

/// A single cart line: a product snapshot and how many of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    id: ProductId,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl CartItem {
    /// Creates a line with the given quantity.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            category: None,
        }
    }

    /// Sets the category label of the line.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Creates a line of one from a product snapshot.
    pub(crate) fn from_product(product: CartProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity: 1,
            category: product.category,
        }
    }

    /// Returns the product identifier of the line.
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// Returns the product name captured when the line was created.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price captured when the line was created.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Returns the quantity of the line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the category label, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns `price * quantity`.
    pub fn subtotal(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

/// Cart contents in insertion order, with a cached total.
///
/// `total` is derived: every constructor and every reducer step recomputes it from
/// the items, so it always equals the sum of the line subtotals.
///
/// Missing fields deserialize to their empty values, which is how a malformed
/// persisted cart degrades to an empty one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartState {
    items: Vec<CartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    total: Decimal,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart holding the given lines.
    ///
    /// Lines with a zero quantity are dropped.
    pub fn from_items(items: impl Into<Vec<CartItem>>) -> Self {
        let mut items = items.into();
        items.retain(|item| item.quantity > 0);

        Self::with_recomputed_total(items)
    }

    pub(crate) fn with_recomputed_total(items: Vec<CartItem>) -> Self {
        let total = cart_total(&items);

        Self { items, total }
    }

    /// Returns the lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the cart total.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Returns the number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Checks whether the product has a line in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Returns the quantity of the product in the cart, or zero when absent.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.item(id).map_or(0, CartItem::quantity)
    }

    /// Returns the line for the product, if present.
    pub fn item(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}
