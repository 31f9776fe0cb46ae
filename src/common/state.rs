use crate::config::Config;
use crate::scoring::ModelRegistry;
use std::sync::Arc;

/// Shared, read-only state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(config: Config, registry: ModelRegistry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
        }
    }
}
