//! Business logic services

pub mod dashboard;
pub mod sheets;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services backed by the Google Sheets API
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = sheets::GoogleSheetsClient::new(&config.sheets)?;
        Ok(Self::with_source(Arc::new(client), config))
    }

    /// Create all services on top of an arbitrary row source
    pub fn with_source(source: Arc<dyn sheets::SheetSource>, config: &AppConfig) -> Self {
        Self {
            dashboard: dashboard::DashboardService::new(
                source,
                config.datasets.clone(),
                config.sheets.on_fetch_error,
            ),
        }
    }
}
