//! Products

pub mod catalog;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use catalog::{LOW_STOCK_THRESHOLD, ProductCatalog};
pub use errors::ProductsServiceError;
pub use service::*;
