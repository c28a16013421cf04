//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use ventafacil::products::CartProduct;

pub use ventafacil::products::ProductId;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    /// Copy of the fields a cart keeps for this product.
    #[must_use]
    pub fn snapshot(&self) -> CartProduct {
        let product = CartProduct::new(self.id, self.name.clone(), self.price);

        if self.category.is_empty() {
            product
        } else {
            product.with_category(self.category.clone())
        }
    }

    /// Whether any unit is left to sell.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
