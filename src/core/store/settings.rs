//! Store settings

use crate::adapters::storage::StorageKeys;
use crate::config::AppConfig;
use crate::core::adherence::ADHERENCE_GOAL;
use crate::core::lifecycle::DEFAULT_WARNING_WINDOW_DAYS;
use crate::domain::Variant;
use serde::{Deserialize, Serialize};

/// Lifecycle parameters and storage keys the record store runs with
///
/// Everything except the keys is persisted under the settings key, so a data
/// directory written for one variant is not silently opened as the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub variant: Variant,
    pub warning_window_days: u32,
    pub adherence_goal: f64,
    pub default_validity_months: u32,
    #[serde(skip)]
    pub keys: StorageKeys,
}

impl StoreSettings {
    /// Defaults for `variant` with the default keys
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
            adherence_goal: ADHERENCE_GOAL,
            default_validity_months: 12,
            keys: StorageKeys::default(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            variant: config.application.variant,
            warning_window_days: config.lifecycle.warning_window_days,
            adherence_goal: config.lifecycle.adherence_goal,
            default_validity_months: config.lifecycle.default_validity_months,
            keys: config.storage.keys(),
        }
    }

    pub fn with_keys(mut self, keys: StorageKeys) -> Self {
        self.keys = keys;
        self
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}
