use std::sync::Arc;

use crate::config::Config;
use crate::source::TemperatureSource;

/// Shared, read-only request context. Every request reloads the data from
/// the source, so nothing here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<TemperatureSource>,
}

impl AppState {
    pub fn new(config: Config, source: TemperatureSource) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
        }
    }
}
