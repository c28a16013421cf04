//! Storefront Checkout

pub mod details;
pub mod errors;
pub mod service;

pub use details::CustomerDetails;
pub use errors::CheckoutError;
pub use service::Checkout;
