//! Products Data

use rust_decimal::Decimal;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_name: Option<String>,
}

/// Product Update Data
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_name: Option<String>,
}
