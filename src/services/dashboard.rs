//! Dashboard service: fetch every dataset and aggregate it

use std::sync::Arc;

use chrono::Utc;

use crate::{
    aggregation,
    api::sheets::DashboardResponse,
    config::{DatasetsConfig, FetchErrorPolicy},
    error::AppResult,
    models::{dataset::DatasetKey, row::RowRecord},
    services::sheets::SheetSource,
};

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn SheetSource>,
    datasets: DatasetsConfig,
    on_fetch_error: FetchErrorPolicy,
}

impl DashboardService {
    pub fn new(
        source: Arc<dyn SheetSource>,
        datasets: DatasetsConfig,
        on_fetch_error: FetchErrorPolicy,
    ) -> Self {
        Self {
            source,
            datasets,
            on_fetch_error,
        }
    }

    /// Fetch one dataset and keep the rows its filter selects
    async fn load(&self, key: DatasetKey) -> AppResult<Vec<RowRecord>> {
        let location = self.datasets.source(key);
        let rows = self
            .source
            .fetch(&location.spreadsheet_id, &location.range)
            .await?;

        let filter = key.filter();
        let fetched = rows.len();
        let rows: Vec<RowRecord> = rows.into_iter().filter(|row| filter.matches(row)).collect();
        tracing::debug!(dataset = %key, fetched, kept = rows.len(), "Loaded dataset");

        Ok(rows)
    }

    /// Apply the fetch-failure policy to one dataset result
    fn settle(
        &self,
        key: DatasetKey,
        loaded: AppResult<Vec<RowRecord>>,
        degraded: &mut Vec<DatasetKey>,
    ) -> AppResult<Vec<RowRecord>> {
        match loaded {
            Ok(rows) => Ok(rows),
            Err(e) if self.on_fetch_error == FetchErrorPolicy::Degrade => {
                tracing::warn!(dataset = %key, error = %e, "Dataset fetch failed, serving it empty");
                degraded.push(key);
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::error!(dataset = %key, error = %e, "Dataset fetch failed");
                Err(e)
            }
        }
    }

    /// Build the full dashboard. Datasets are fetched concurrently and
    /// aggregated once every fetch has completed.
    pub async fn build(&self) -> AppResult<DashboardResponse> {
        let (alerts, misalignments, videos, issues) = tokio::join!(
            self.load(DatasetKey::AlertTracking),
            self.load(DatasetKey::MisalignmentTracking),
            self.load(DatasetKey::HistoricalVideoRequests),
            self.load(DatasetKey::AllIssues),
        );

        let mut degraded = Vec::new();
        let alerts = self.settle(DatasetKey::AlertTracking, alerts, &mut degraded)?;
        let misalignments =
            self.settle(DatasetKey::MisalignmentTracking, misalignments, &mut degraded)?;
        let videos = self.settle(DatasetKey::HistoricalVideoRequests, videos, &mut degraded)?;
        let issues = self.settle(DatasetKey::AllIssues, issues, &mut degraded)?;

        let response = DashboardResponse {
            alert_tracking: aggregation::aggregate(&alerts, &DatasetKey::AlertTracking.mapping())?,
            misalignment_tracking: aggregation::aggregate(
                &misalignments,
                &DatasetKey::MisalignmentTracking.mapping(),
            )?,
            historical_video_requests: aggregation::aggregate(
                &videos,
                &DatasetKey::HistoricalVideoRequests.mapping(),
            )?,
            all_issues: aggregation::aggregate_dual(&issues, &DatasetKey::AllIssues.mapping())?,
            last_updated: Utc::now(),
            degraded,
        };

        tracing::info!(
            alerts = response.alert_tracking.total,
            misalignments = response.misalignment_tracking.total,
            video_requests = response.historical_video_requests.total,
            issues_raised = response.all_issues.total_raised,
            degraded = response.degraded.len(),
            "Dashboard computed"
        );

        Ok(response)
    }
}
