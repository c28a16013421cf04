//! Setting Records

use jiff::Timestamp;

/// Setting Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRecord {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}
