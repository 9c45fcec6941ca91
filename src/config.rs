//! Configuration management for the ops dashboard server

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use validator::Validate;

use crate::models::dataset::DatasetKey;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a whole request, sheet fetches included
    #[validate(range(min = 1, message = "request_timeout_secs must be at least 1"))]
    pub request_timeout_secs: u64,
}

/// What to do when one dataset cannot be fetched
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorPolicy {
    /// Log the failure, serve an empty summary and list the dataset as degraded
    #[default]
    Degrade,
    /// Fail the whole request
    Fail,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct SheetsConfig {
    #[validate(url(message = "sheets.base_url must be a valid URL"))]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[validate(range(min = 1, max = 300, message = "sheets.timeout_secs must be within 1..=300"))]
    pub timeout_secs: u64,
    #[serde(default)]
    pub on_fetch_error: FetchErrorPolicy,
}

/// Location of one dataset in the spreadsheet backend
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct DatasetSource {
    #[validate(length(min = 1, message = "spreadsheet_id must not be empty"))]
    pub spreadsheet_id: String,
    #[validate(length(min = 1, message = "range must not be empty"))]
    pub range: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct DatasetsConfig {
    #[validate(nested)]
    pub alert_tracking: DatasetSource,
    #[validate(nested)]
    pub misalignment_tracking: DatasetSource,
    #[validate(nested)]
    pub historical_video_requests: DatasetSource,
    #[validate(nested)]
    pub all_issues: DatasetSource,
}

impl DatasetsConfig {
    pub fn source(&self, key: DatasetKey) -> &DatasetSource {
        match key {
            DatasetKey::AlertTracking => &self.alert_tracking,
            DatasetKey::MisalignmentTracking => &self.misalignment_tracking,
            DatasetKey::HistoricalVideoRequests => &self.historical_video_requests,
            DatasetKey::AllIssues => &self.all_issues,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
    /// When set, logs are also written to a daily rolling file in this directory
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub sheets: SheetsConfig,
    #[validate(nested)]
    pub datasets: DatasetsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // OPS_DASHBOARD_SHEETS__TIMEOUT_SECS=5 -> sheets.timeout_secs
            .add_source(
                Environment::with_prefix("OPS_DASHBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("sheets.api_key", env::var("GOOGLE_SHEETS_API_KEY").ok())?;

        Self::from_builder(builder)
    }

    /// Build, deserialize and validate a prepared configuration builder
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config
            .validate()
            .map_err(|e| ConfigError::Message(format!("Invalid configuration: {}", e)))?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            on_fetch_error: FetchErrorPolicy::Degrade,
        }
    }
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        let alerts_sheet = "1GPDqOSURZNALalPzfHNbMft0HQ1c_fIkgfu_V3fSroY";
        let issues_sheet = "1DzW-6Q7hTNn2hSJbEHOkSrbalOmbDIftdjw4I_PhEdA";
        let source = |id: &str, range: &str| DatasetSource {
            spreadsheet_id: id.to_string(),
            range: range.to_string(),
        };

        Self {
            alert_tracking: source(alerts_sheet, "Alert_Tracking!A:Z"),
            misalignment_tracking: source(alerts_sheet, "Misalignment_Tracking!A:Z"),
            historical_video_requests: source(issues_sheet, "Issues- Realtime!A:Z"),
            all_issues: source(issues_sheet, "Issues- Realtime!A:Z"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}
