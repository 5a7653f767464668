// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::clock::SystemClock;
use crate::logger::LogLevel;
use crate::router::Router;

/// Application state
pub struct AppState {
    pub config: Config,
    pub router: Router,
    pub log_level: LogLevel,
}

impl AppState {
    /// State wired with the wall clock
    pub fn new(config: &Config) -> Self {
        Self::with_router(config, Router::new(Arc::new(SystemClock)))
    }

    /// State with an explicitly constructed router, e.g. one holding a fixed clock
    pub fn with_router(config: &Config, router: Router) -> Self {
        Self {
            config: config.clone(),
            router,
            log_level: LogLevel::parse(&config.logging.level),
        }
    }

    /// Whether per-request access lines should be written
    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log && self.log_level.allows(LogLevel::Info)
    }
}
