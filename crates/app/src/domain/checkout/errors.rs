//! Checkout errors.

use thiserror::Error;

use crate::domain::orders::OrdersServiceError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("please fill in every required field")]
    MissingFields,

    #[error("please enter a valid email address")]
    InvalidEmail,

    #[error("please enter a valid phone number")]
    InvalidPhone,

    #[error("the cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Orders(#[from] OrdersServiceError),
}
