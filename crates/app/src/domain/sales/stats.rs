//! Sales statistics over calendar periods.

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp, Zoned};
use rust_decimal::Decimal;

use crate::domain::sales::records::SaleTotal;

/// Reporting period, anchored on local midnight of the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesPeriod {
    Today,
    Yesterday,
    Week,
    Month,
}

/// Half-open timestamp window: `start <= t < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalesWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl SalesWindow {
    #[must_use]
    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp < self.end
    }
}

impl SalesPeriod {
    /// Resolves the period relative to `now`, in `now`'s time zone.
    ///
    /// # Errors
    ///
    /// Returns an error when the window falls outside the supported timestamp range.
    pub fn window(self, now: &Zoned) -> Result<SalesWindow, jiff::Error> {
        let midnight = now.start_of_day()?.timestamp();
        let day = SignedDuration::from_hours(24);

        let window = match self {
            Self::Today => SalesWindow {
                start: midnight,
                end: midnight.checked_add(day)?,
            },
            Self::Yesterday => SalesWindow {
                start: midnight.checked_sub(day)?,
                end: midnight,
            },
            Self::Week => SalesWindow {
                start: midnight.checked_sub(day * 7)?,
                end: now.timestamp(),
            },
            Self::Month => SalesWindow {
                start: midnight.checked_sub(day * 30)?,
                end: now.timestamp(),
            },
        };

        Ok(window)
    }
}

impl fmt::Display for SalesPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Week => "week",
            Self::Month => "month",
        })
    }
}

impl FromStr for SalesPeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!("unknown sales period `{other}`")),
        }
    }
}

/// Aggregate figures for a set of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesStats {
    pub total_sales: Decimal,
    pub transactions: u64,

    /// Mean sale total, rounded to cents. Zero when there are no sales.
    pub average_ticket: Decimal,
}

impl SalesStats {
    #[must_use]
    pub fn from_sales(sales: &[SaleTotal]) -> Self {
        let total_sales: Decimal = sales.iter().map(|sale| sale.total).sum();
        let transactions = sales.len() as u64;

        let average_ticket = if transactions == 0 {
            Decimal::ZERO
        } else {
            (total_sales / Decimal::from(transactions)).round_dp(2)
        };

        Self {
            total_sales,
            transactions,
            average_ticket,
        }
    }
}
