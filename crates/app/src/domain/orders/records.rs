//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ventafacil::{pricing::line_total, products::ProductId};

use crate::uuids::TypedUuid;

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order lifecycle. Orders start out pending and are either approved into a sale or
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting review. Legacy rows store this as `nuevo`.
    #[serde(alias = "nuevo")]
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    /// Value written to the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Every stored value that reads as this status.
    #[must_use]
    pub fn stored_values(self) -> Vec<String> {
        match self {
            Self::Pending => vec!["pending".to_string(), "nuevo".to_string()],
            other => vec![other.as_str().to_string()],
        }
    }

    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" | "nuevo" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown order status `{other}`")),
        }
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub notes: Option<String>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order line joined with the product it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub id: i64,
    pub order_uuid: OrderUuid,
    pub product_id: ProductId,
    pub product_code: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderItemRecord {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}
