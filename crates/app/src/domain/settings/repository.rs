//! Settings Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::settings::records::SettingRecord;

const LIST_SETTINGS_SQL: &str = include_str!("sql/list_settings.sql");
const UPSERT_SETTING_SQL: &str = include_str!("sql/upsert_setting.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSettingsRepository;

impl PgSettingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_settings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<SettingRecord>, sqlx::Error> {
        query_as::<Postgres, SettingRecord>(LIST_SETTINGS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_setting(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        value: &str,
    ) -> Result<SettingRecord, sqlx::Error> {
        query_as::<Postgres, SettingRecord>(UPSERT_SETTING_SQL)
            .bind(key)
            .bind(value)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SettingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
