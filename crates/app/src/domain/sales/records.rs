//! Sale Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ventafacil::pricing::line_total;

use crate::uuids::TypedUuid;

/// Sale UUID
pub type SaleUuid = TypedUuid<SaleRecord>;

/// Sale Record
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub uuid: SaleUuid,
    pub total: Decimal,
    pub items: Vec<SaleLine>,
    pub created_at: Timestamp,
}

/// One sold product, as stored with the sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl SaleLine {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

/// Total and time of a sale, for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTotal {
    pub total: Decimal,
    pub created_at: Timestamp,
}
