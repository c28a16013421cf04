//! Settings cache.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{
    domain::settings::{
        SettingsService, errors::SettingsServiceError, models::StoreSettings,
        records::SettingRecord,
    },
    notifications::Notifier,
};

/// Raw settings plus the typed view derived from them.
pub struct SettingsStore {
    service: Arc<dyn SettingsService>,
    notifier: Arc<dyn Notifier>,
    values: FxHashMap<String, String>,
    settings: StoreSettings,
}

impl SettingsStore {
    #[must_use]
    pub fn new(service: Arc<dyn SettingsService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            values: FxHashMap::default(),
            settings: StoreSettings::default(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Raw stored value for `key`.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Reloads every setting.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the current settings are kept.
    pub async fn refresh(&mut self) -> Result<&StoreSettings, SettingsServiceError> {
        match self.service.list_settings().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "settings refreshed");

                self.values = records
                    .into_iter()
                    .map(|record| (record.key, record.value))
                    .collect();
                self.settings = StoreSettings::from_map(&self.values);

                Ok(&self.settings)
            }
            Err(error) => {
                tracing::error!(%error, "failed to load settings");
                self.notifier
                    .error(&format!("failed to load settings: {error}"));

                Err(error)
            }
        }
    }

    /// Stores a setting and re-derives the typed settings once the backend confirms.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the current settings are kept.
    pub async fn update(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<SettingRecord, SettingsServiceError> {
        match self.service.update_setting(key, value).await {
            Ok(record) => {
                self.values.insert(record.key.clone(), record.value.clone());
                self.settings = StoreSettings::from_map(&self.values);
                self.notifier.success("settings saved");

                Ok(record)
            }
            Err(error) => {
                tracing::error!(%error, key, "failed to save setting");
                self.notifier
                    .error(&format!("failed to save setting {key}: {error}"));

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::settings::{
            MockSettingsService,
            models::{BUSINESS_NAME, TAX_RATE},
        },
        notifications::MockNotifier,
    };

    use super::*;

    fn record(key: &str, value: &str) -> SettingRecord {
        SettingRecord {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn refresh_derives_typed_settings() -> TestResult {
        let mut service = MockSettingsService::new();

        service
            .expect_list_settings()
            .once()
            .return_once(|| Ok(vec![record(BUSINESS_NAME, "Tienda"), record(TAX_RATE, "16")]));

        let mut store = SettingsStore::new(Arc::new(service), Arc::new(MockNotifier::new()));

        let settings = store.refresh().await?;

        assert_eq!(settings.business.name, "Tienda");
        assert_eq!(settings.business.tax_rate, Decimal::from(16));
        assert_eq!(store.value(TAX_RATE), Some("16"));

        Ok(())
    }

    #[tokio::test]
    async fn update_rederives_after_confirmation() -> TestResult {
        let mut service = MockSettingsService::new();

        service
            .expect_update_setting()
            .withf(|key, value| key == BUSINESS_NAME && value == "Tienda Dos")
            .once()
            .return_once(|key, value| Ok(record(key, value)));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_success()
            .withf(|message| message == "settings saved")
            .once()
            .return_const(());

        let mut store = SettingsStore::new(Arc::new(service), Arc::new(notifier));

        store.update(BUSINESS_NAME, "Tienda Dos").await?;

        assert_eq!(store.settings().business.name, "Tienda Dos");

        Ok(())
    }

    #[tokio::test]
    async fn failed_update_keeps_settings() {
        let mut service = MockSettingsService::new();

        service
            .expect_update_setting()
            .once()
            .return_once(|_, _| Err(SettingsServiceError::MissingRequiredData));

        let mut notifier = MockNotifier::new();
        notifier.expect_error().once().return_const(());

        let mut store = SettingsStore::new(Arc::new(service), Arc::new(notifier));

        let result = store.update(BUSINESS_NAME, "Tienda Dos").await;

        assert!(result.is_err());
        assert_eq!(store.settings(), &StoreSettings::default());
        assert_eq!(store.value(BUSINESS_NAME), None);
    }
}
