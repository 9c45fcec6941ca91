//! Dashboard data endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        dataset::DatasetKey,
        summary::{DualSummary, Summary},
    },
};

/// Everything the dashboard renders, recomputed on every request
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// L2 alerts (placeholder "No L2 alerts found" rows excluded)
    pub alert_tracking: Summary,
    /// Misalignments, weighted by the sheet's Count column
    pub misalignment_tracking: Summary,
    /// Historical video requests, with raised-to-resolved times
    pub historical_video_requests: Summary,
    /// Every issue, counted when raised and when closed
    pub all_issues: DualSummary,
    /// When this response was computed
    pub last_updated: DateTime<Utc>,
    /// Datasets whose fetch failed and are served empty
    pub degraded: Vec<DatasetKey>,
}

/// Aggregated dashboard data
#[utoipa::path(
    get,
    path = "/sheets",
    tag = "dashboard",
    responses(
        (status = 200, description = "Aggregated dataset summaries", body = DashboardResponse),
        (status = 502, description = "A spreadsheet fetch failed", body = crate::error::ErrorResponse),
        (status = 504, description = "The spreadsheet backend timed out", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
) -> AppResult<Json<DashboardResponse>> {
    let response = state.services.dashboard.build().await?;
    Ok(Json(response))
}
