//! Per-run application context

use super::config::AppConfig;
use crate::printing::LabelService;
use std::path::Path;

/// Everything an action needs, built once in `main`
#[derive(Debug, Clone)]
pub struct AppContext {
    config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.config.downloads_dir
    }

    /// Label service for the configured Zebra printer
    pub fn label_service(&self) -> LabelService {
        LabelService::new(self.config.label_target(), self.config.connect_timeout())
    }
}
