//! Typed store settings.
//!
//! Settings are stored as free-form key/value rows. [`StoreSettings`] collapses them into
//! a typed struct, falling back to a default for every key that is missing or blank.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::domain::settings::records::SettingRecord;

pub const THEME_MODE: &str = "theme_mode";
pub const THEME_PRIMARY_COLOR: &str = "theme_primary_color";
pub const THEME_SECONDARY_COLOR: &str = "theme_secondary_color";
pub const ADMIN_EMAIL: &str = "admin_email";
pub const ADMIN_PHONE: &str = "admin_phone";
pub const BUSINESS_ADDRESS: &str = "business_address";
pub const BUSINESS_HOURS: &str = "business_hours";
pub const BUSINESS_NAME: &str = "business_name";
pub const CURRENCY_SYMBOL: &str = "currency_symbol";
pub const TAX_RATE: &str = "tax_rate";
pub const ORDER_CONFIRMATION_MESSAGE: &str = "order_confirmation_message";
pub const EMAIL_NOTIFICATIONS: &str = "email_notifications";
pub const ENABLE_ONLINE_ORDERS: &str = "enable_online_orders";

const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
const DEFAULT_SECONDARY_COLOR: &str = "#64748b";
const DEFAULT_BUSINESS_NAME: &str = "Mi Negocio";
const DEFAULT_CURRENCY_SYMBOL: &str = "$";
const DEFAULT_CONFIRMATION_MESSAGE: &str = "Gracias por tu pedido. Te contactaremos pronto.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    Auto,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown theme mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSettings {
    pub mode: ThemeMode,
    pub primary_color: String,
    pub secondary_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactSettings {
    pub admin_email: String,
    pub admin_phone: String,
    pub business_address: String,
    pub business_hours: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessSettings {
    pub name: String,
    pub currency_symbol: String,
    pub tax_rate: Decimal,
    pub confirmation_message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub online_orders_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub theme: ThemeSettings,
    pub contact: ContactSettings,
    pub business: BusinessSettings,
    pub notifications: NotificationSettings,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::from_map(&FxHashMap::default())
    }
}

impl StoreSettings {
    /// Builds the settings from stored rows.
    #[must_use]
    pub fn from_records(records: &[SettingRecord]) -> Self {
        let values = records
            .iter()
            .map(|record| (record.key.clone(), record.value.clone()))
            .collect();

        Self::from_map(&values)
    }

    /// Builds the settings from raw key/value pairs.
    #[must_use]
    pub fn from_map(values: &FxHashMap<String, String>) -> Self {
        let lookup = |key: &str| {
            values
                .get(key)
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        };

        let text = |key: &str, default: &str| lookup(key).unwrap_or(default).to_string();

        let flag = |key: &str| lookup(key).is_none_or(|value| value == "true");

        Self {
            theme: ThemeSettings {
                mode: lookup(THEME_MODE)
                    .and_then(|mode| mode.parse().ok())
                    .unwrap_or_default(),
                primary_color: text(THEME_PRIMARY_COLOR, DEFAULT_PRIMARY_COLOR),
                secondary_color: text(THEME_SECONDARY_COLOR, DEFAULT_SECONDARY_COLOR),
            },
            contact: ContactSettings {
                admin_email: text(ADMIN_EMAIL, ""),
                admin_phone: text(ADMIN_PHONE, ""),
                business_address: text(BUSINESS_ADDRESS, ""),
                business_hours: text(BUSINESS_HOURS, ""),
            },
            business: BusinessSettings {
                name: text(BUSINESS_NAME, DEFAULT_BUSINESS_NAME),
                currency_symbol: text(CURRENCY_SYMBOL, DEFAULT_CURRENCY_SYMBOL),
                tax_rate: lookup(TAX_RATE)
                    .and_then(|rate| rate.trim().parse().ok())
                    .unwrap_or_default(),
                confirmation_message: text(
                    ORDER_CONFIRMATION_MESSAGE,
                    DEFAULT_CONFIRMATION_MESSAGE,
                ),
            },
            notifications: NotificationSettings {
                email_enabled: flag(EMAIL_NOTIFICATIONS),
                online_orders_enabled: flag(ENABLE_ONLINE_ORDERS),
            },
        }
    }
}
