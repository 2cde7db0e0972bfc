use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::layout::LayoutConfig;
use crate::models::Show;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Replaced when the layout override file changes.
    pub layout_config: Arc<RwLock<LayoutConfig>>,
    /// Currently loaded dataset, replaced wholesale on every reload.
    pub shows: Arc<RwLock<Vec<Show>>>,
}

impl AppState {
    pub fn new(config: Config, layout_config: LayoutConfig, shows: Vec<Show>) -> Self {
        Self {
            config,
            layout_config: Arc::new(RwLock::new(layout_config)),
            shows: Arc::new(RwLock::new(shows)),
        }
    }
}
