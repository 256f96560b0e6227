//! Settings service
//!
//! Explicit load/save lifecycle for the [`AppSettings`] singleton. The
//! pricing calculation receives a settings value as input; nothing reads
//! configuration from ambient global state.

use crate::storage::{self, CollectionStore};
use shared::error::AppResult;
use shared::models::AppSettings;
use validator::Validate;

#[derive(Clone, Debug)]
pub struct SettingsService {
    store: CollectionStore,
}

impl SettingsService {
    pub fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    /// Current settings; documented defaults when never saved
    pub fn get(&self) -> AppResult<AppSettings> {
        Ok(self.store.load_object(storage::SETTINGS)?)
    }

    /// Validate and persist new settings
    pub fn save(&self, settings: AppSettings) -> AppResult<AppSettings> {
        settings.validate()?;
        self.store.store_object(storage::SETTINGS, &settings)?;
        tracing::info!(store_name = %settings.store_name, "settings saved");
        Ok(settings)
    }

    /// Restore the documented defaults
    pub fn reset(&self) -> AppResult<AppSettings> {
        self.save(AppSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    fn service() -> SettingsService {
        SettingsService::new(CollectionStore::open_in_memory().unwrap())
    }

    #[test]
    fn test_defaults_before_first_save() {
        let svc = service();
        assert_eq!(svc.get().unwrap(), AppSettings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let svc = service();
        let mut settings = AppSettings::default();
        settings.store_name = "Warung Kita".to_string();
        settings.tax_rate = 11.0;
        svc.save(settings.clone()).unwrap();
        assert_eq!(svc.get().unwrap(), settings);
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let svc = service();
        let settings = AppSettings {
            service_charge_rate: -1.0,
            ..Default::default()
        };
        let err = svc.save(settings).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        // nothing persisted
        assert_eq!(svc.get().unwrap(), AppSettings::default());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let svc = service();
        let mut settings = AppSettings::default();
        settings.dark_mode = true;
        svc.save(settings).unwrap();
        svc.reset().unwrap();
        assert_eq!(svc.get().unwrap(), AppSettings::default());
    }
}
