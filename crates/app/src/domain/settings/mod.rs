//! Store Settings

pub mod errors;
pub mod models;
pub mod records;
mod repository;
pub mod service;
pub mod store;

pub use errors::SettingsServiceError;
pub use models::StoreSettings;
pub use service::*;
pub use store::SettingsStore;
