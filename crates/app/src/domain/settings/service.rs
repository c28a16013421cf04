//! Settings service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::settings::{
        errors::SettingsServiceError, records::SettingRecord, repository::PgSettingsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSettingsService {
    db: Db,
    repository: PgSettingsRepository,
}

impl PgSettingsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSettingsRepository::new(),
        }
    }
}

#[async_trait]
impl SettingsService for PgSettingsService {
    async fn list_settings(&self) -> Result<Vec<SettingRecord>, SettingsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let settings = self.repository.list_settings(&mut tx).await?;

        tx.commit().await?;

        Ok(settings)
    }

    async fn update_setting(
        &self,
        key: &str,
        value: &str,
    ) -> Result<SettingRecord, SettingsServiceError> {
        if key.trim().is_empty() {
            return Err(SettingsServiceError::EmptyKey);
        }

        let mut tx = self.db.begin_transaction().await?;

        let setting = self.repository.upsert_setting(&mut tx, key, value).await?;

        tx.commit().await?;

        tracing::debug!(key, "setting updated");

        Ok(setting)
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Retrieves every stored setting.
    async fn list_settings(&self) -> Result<Vec<SettingRecord>, SettingsServiceError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn update_setting(
        &self,
        key: &str,
        value: &str,
    ) -> Result<SettingRecord, SettingsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn update_setting_upserts_on_key() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.settings.update_setting("business_name", "Tienda").await?;
        let second = ctx
            .settings
            .update_setting("business_name", "Tienda Dos")
            .await?;

        let settings = ctx.settings.list_settings().await?;

        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].value, "Tienda Dos");
        assert!(second.updated_at >= first.updated_at);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn blank_key_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.settings.update_setting("  ", "value").await;

        assert!(
            matches!(result, Err(SettingsServiceError::EmptyKey)),
            "expected EmptyKey, got {result:?}"
        );
    }
}
