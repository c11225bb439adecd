use tokio::sync::RwLock;

use crate::config::{AppConfig, ApiKeys};
use crate::logger::{Logger, SessionMetrics};

/// Shared state behind every request handler.
pub struct DashboardState {
    pub config: AppConfig,
    pub api_keys: ApiKeys,
    pub metrics: RwLock<SessionMetrics>,
    pub logger: Option<Logger>,
}

impl DashboardState {
    pub fn new(config: AppConfig, api_keys: ApiKeys, logger: Option<Logger>) -> Self {
        Self {
            config,
            api_keys,
            metrics: RwLock::new(SessionMetrics::new()),
            logger,
        }
    }
}
