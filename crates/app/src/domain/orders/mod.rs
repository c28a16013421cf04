//! Online Orders

pub mod board;
pub mod changes;
pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use board::OrdersBoard;
pub use changes::{OrderChange, PgOrderFeed};
pub use errors::OrdersServiceError;
pub use service::*;
