//! Sales Data

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use ventafacil::{cart::CartState, products::ProductId};

use crate::domain::sales::{
    errors::SalesServiceError,
    records::{SaleLine, SaleUuid},
    stats::SalesWindow,
};

/// New Sale Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub uuid: SaleUuid,
    pub items: Vec<SaleLine>,
}

impl NewSale {
    #[must_use]
    pub fn new(items: Vec<SaleLine>) -> Self {
        Self {
            uuid: SaleUuid::generate(),
            items,
        }
    }

    /// Builds a sale from the lines of `cart`, looking up each product's scan code in
    /// `codes`.
    ///
    /// # Errors
    ///
    /// Returns [`SalesServiceError::MissingProductCode`] for a line with no known code.
    pub fn from_cart(
        cart: &CartState,
        codes: &FxHashMap<ProductId, String>,
    ) -> Result<Self, SalesServiceError> {
        let items = cart
            .items()
            .iter()
            .map(|item| {
                let code = codes
                    .get(&item.id())
                    .ok_or(SalesServiceError::MissingProductCode(item.id()))?;

                Ok(SaleLine {
                    code: code.clone(),
                    name: item.name().to_string(),
                    price: item.price(),
                    quantity: item.quantity(),
                })
            })
            .collect::<Result<Vec<_>, SalesServiceError>>()?;

        Ok(Self::new(items))
    }

    /// Sum of the line subtotals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(SaleLine::subtotal).sum()
    }
}

/// Sales listing window. Both bounds are inclusive; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesFilter {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl From<SalesWindow> for SalesFilter {
    fn from(window: SalesWindow) -> Self {
        Self {
            start: Some(window.start),
            end: Some(window.end),
        }
    }
}
