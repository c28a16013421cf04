//! Real-time order changes.
//!
//! A trigger on `online_orders` publishes every insert, update and delete as JSON on the
//! [`ORDER_CHANGES_CHANNEL`] channel. [`PgOrderFeed`] listens on it and decodes each
//! payload into an [`OrderChange`].

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::postgres::PgListener;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::orders::records::{OrderRecord, OrderStatus, OrderUuid},
};

/// Notification channel fed by the `online_orders` trigger.
pub const ORDER_CHANGES_CHANNEL: &str = "online_orders_changes";

#[derive(Debug, Clone, PartialEq)]
pub enum OrderChange {
    Inserted(OrderRecord),
    Updated(OrderRecord),
    Deleted(OrderRecord),
}

impl OrderChange {
    /// Decodes a notification payload.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not a well-formed change event.
    pub fn from_payload(payload: &str) -> Result<Self, serde_json::Error> {
        let change = match serde_json::from_str::<ChangePayload>(payload)? {
            ChangePayload::Insert(order) => Self::Inserted(order.into()),
            ChangePayload::Update(order) => Self::Updated(order.into()),
            ChangePayload::Delete(order) => Self::Deleted(order.into()),
        };

        Ok(change)
    }

    /// The order as it was after the change, or before it for deletes.
    #[must_use]
    pub fn order(&self) -> &OrderRecord {
        match self {
            Self::Inserted(order) | Self::Updated(order) | Self::Deleted(order) => order,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "order")]
enum ChangePayload {
    #[serde(rename = "INSERT")]
    Insert(OrderPayload),

    #[serde(rename = "UPDATE")]
    Update(OrderPayload),

    #[serde(rename = "DELETE")]
    Delete(OrderPayload),
}

#[derive(Debug, Deserialize)]
struct OrderPayload {
    id: Uuid,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    customer_address: String,
    notes: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    total: Decimal,
    status: OrderStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<OrderPayload> for OrderRecord {
    fn from(payload: OrderPayload) -> Self {
        Self {
            uuid: OrderUuid::from_uuid(payload.id),
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            customer_address: payload.customer_address,
            notes: payload.notes,
            total: payload.total,
            status: payload.status,
            created_at: payload.created_at,
            updated_at: payload.updated_at,
        }
    }
}

#[derive(Debug, Error)]
pub enum OrderFeedError {
    #[error("order change subscription failed")]
    Listen(#[from] sqlx::Error),
}

/// Subscription to order changes over a dedicated `LISTEN` connection.
pub struct PgOrderFeed {
    listener: PgListener,
}

impl PgOrderFeed {
    /// Opens the subscription.
    ///
    /// # Errors
    ///
    /// Returns an error when the listening connection cannot be established.
    pub async fn subscribe(db: &Db) -> Result<Self, OrderFeedError> {
        let listener = db.listen(ORDER_CHANGES_CHANNEL).await?;

        tracing::debug!(channel = ORDER_CHANGES_CHANNEL, "subscribed to order changes");

        Ok(Self { listener })
    }

    /// Waits for the next change. Payloads that cannot be decoded are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection is lost and cannot be re-established.
    pub async fn next(&mut self) -> Result<OrderChange, OrderFeedError> {
        loop {
            let notification = self.listener.recv().await?;

            match OrderChange::from_payload(notification.payload()) {
                Ok(change) => return Ok(change),
                Err(error) => {
                    tracing::warn!(
                        %error,
                        payload = notification.payload(),
                        "skipping undecodable order change"
                    );
                }
            }
        }
    }
}
