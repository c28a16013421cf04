//! Cart service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartServiceError {
    #[error("{product} is out of stock")]
    OutOfStock { product: String },

    #[error("only {available} units of {product} are available")]
    InsufficientStock { product: String, available: u32 },
}
