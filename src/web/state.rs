use crate::config::AppConfig;
use crate::data::Dataset;

/// Shared application state for the web server. The dataset is read-only
/// after startup, so handlers can aggregate over it concurrently without
/// any locking.
pub struct AppState {
    pub config: AppConfig,
    pub dataset: Dataset,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: AppConfig, dataset: Dataset) -> Self {
        Self {
            config,
            dataset,
            startup_time: chrono::Utc::now(),
        }
    }
}
