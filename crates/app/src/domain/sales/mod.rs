//! Sales

pub mod data;
pub mod errors;
pub mod ledger;
pub mod point_of_sale;
pub mod records;
pub mod report;
mod repository;
pub mod service;
pub mod stats;

pub use errors::SalesServiceError;
pub use ledger::SalesLedger;
pub use point_of_sale::{PointOfSale, PointOfSaleError};
pub use report::{ProductSales, SalesReport, TOP_PRODUCTS};
pub use service::*;
pub use stats::{SalesPeriod, SalesStats, SalesWindow};
