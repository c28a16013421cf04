//! VentaFacil prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartAction, CartItem, CartState, reduce},
    pricing::{cart_total, format_price, line_total},
    products::{CartProduct, ProductId},
};
