//! Ops Dashboard
//!
//! Fetches alert, misalignment and issue tracking sheets, aggregates them
//! into monthly and per-client summaries and serves the result as JSON.

use std::sync::Arc;

pub mod aggregation;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
