//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier as assigned by the backend.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw backend identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw backend identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// The product fields a cart copies when the product is added.
///
/// The cart never refers back to the product: later price or name changes do not
/// affect lines that are already in a cart.
#[derive(Clone, Debug, PartialEq)]
pub struct CartProduct {
    /// Product identifier, used to merge repeated adds.
    pub id: ProductId,

    /// Display name at the time of adding.
    pub name: String,

    /// Unit price at the time of adding.
    pub price: Decimal,

    /// Optional category label.
    pub category: Option<String>,
}

impl CartProduct {
    /// Creates a snapshot without a category.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: None,
        }
    }

    /// Sets the category of the snapshot.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
