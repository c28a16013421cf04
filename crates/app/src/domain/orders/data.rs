//! Orders Data

use rust_decimal::Decimal;
use ventafacil::{cart::CartState, products::ProductId};

use crate::domain::orders::records::OrderUuid;

/// Customer contact details attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub customer: OrderCustomer,
    pub total: Decimal,
    pub items: Vec<NewOrderItem>,
}

/// New Order Item Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

impl NewOrder {
    /// Order for the contents of `cart`: one item per line, total equal to the cart
    /// total.
    #[must_use]
    pub fn from_cart(cart: &CartState, customer: OrderCustomer) -> Self {
        Self {
            uuid: OrderUuid::generate(),
            customer,
            total: cart.total(),
            items: cart
                .items()
                .iter()
                .map(|item| NewOrderItem {
                    product_id: item.id(),
                    quantity: item.quantity(),
                    price: item.price(),
                })
                .collect(),
        }
    }
}
