//! Dataset catalogue: which columns each dataset is aggregated on

use serde::Serialize;
use utoipa::ToSchema;

use super::row::RowRecord;

/// The four datasets served by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DatasetKey {
    AlertTracking,
    MisalignmentTracking,
    HistoricalVideoRequests,
    AllIssues,
}

const ALERT_TYPE: &str = "Alert Type";
const NO_ALERTS_MARKER: &str = "No L2 alerts found";
const SUB_REQUEST: &str = "Sub-request";
const HISTORICAL_VIDEO_REQUEST: &str = "Historical Video Request";
const DATE: &str = "Date";
const CLIENT_NAME: &str = "Client Name";
const COUNT: &str = "Count";
const RAISED_AT: &str = "Timestamp Issues Raised";
const RESOLVED_AT: &str = "Timestamp Issues Resolved";
const CLIENTS: &str = "Clients";

impl DatasetKey {
    pub const ALL: [DatasetKey; 4] = [
        DatasetKey::AlertTracking,
        DatasetKey::MisalignmentTracking,
        DatasetKey::HistoricalVideoRequests,
        DatasetKey::AllIssues,
    ];

    /// JSON key of the dataset in the dashboard response
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKey::AlertTracking => "alertTracking",
            DatasetKey::MisalignmentTracking => "misalignmentTracking",
            DatasetKey::HistoricalVideoRequests => "historicalVideoRequests",
            DatasetKey::AllIssues => "allIssues",
        }
    }

    /// Rows kept before aggregation
    pub fn filter(&self) -> RowFilter {
        match self {
            DatasetKey::AlertTracking => RowFilter::ExcludeValue {
                column: ALERT_TYPE,
                value: NO_ALERTS_MARKER,
            },
            DatasetKey::HistoricalVideoRequests => RowFilter::Contains {
                column: SUB_REQUEST,
                needle: HISTORICAL_VIDEO_REQUEST,
            },
            DatasetKey::MisalignmentTracking | DatasetKey::AllIssues => RowFilter::KeepAll,
        }
    }

    pub fn mapping(&self) -> FieldMapping {
        match self {
            DatasetKey::AlertTracking => FieldMapping::single(DATE, CLIENT_NAME),
            DatasetKey::MisalignmentTracking => {
                FieldMapping::single(DATE, CLIENT_NAME).with_count(COUNT)
            }
            DatasetKey::HistoricalVideoRequests => {
                FieldMapping::single(RAISED_AT, CLIENTS).with_resolved(RESOLVED_AT)
            }
            DatasetKey::AllIssues => FieldMapping::raised_resolved(RAISED_AT, RESOLVED_AT, CLIENTS),
        }
    }
}

impl std::fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row selection applied to a sheet before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    KeepAll,
    /// Column must be non-empty and different from `value`
    ExcludeValue {
        column: &'static str,
        value: &'static str,
    },
    /// Column must contain `needle`
    Contains {
        column: &'static str,
        needle: &'static str,
    },
}

impl RowFilter {
    pub fn matches(&self, row: &RowRecord) -> bool {
        match *self {
            RowFilter::KeepAll => true,
            RowFilter::ExcludeValue { column, value } => {
                matches!(row.non_empty(column), Some(v) if v != value)
            }
            RowFilter::Contains { column, needle } => {
                row.get(column).is_some_and(|v| v.contains(needle))
            }
        }
    }
}

/// Date columns used for month bucketing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFields {
    /// One date drives the monthly and client breakdowns. `resolved`, when
    /// set, pairs with `date` to measure resolution time.
    Single {
        date: String,
        resolved: Option<String>,
    },
    /// Raised and resolved dates each feed their own monthly breakdown
    RaisedResolved { raised: String, resolved: String },
}

/// Column selection for one aggregation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    pub dates: DateFields,
    /// Client label column. Values are trimmed, so `"Acme "` and `"Acme"` are
    /// one client; blank, whitespace-only or missing values count as "Unknown"
    pub client_field: String,
    /// Per-row event multiplier; each row counts once when unset
    pub count_field: Option<String>,
}

impl FieldMapping {
    pub fn single(date_field: impl Into<String>, client_field: impl Into<String>) -> Self {
        Self {
            dates: DateFields::Single {
                date: date_field.into(),
                resolved: None,
            },
            client_field: client_field.into(),
            count_field: None,
        }
    }

    pub fn raised_resolved(
        raised_field: impl Into<String>,
        resolved_field: impl Into<String>,
        client_field: impl Into<String>,
    ) -> Self {
        Self {
            dates: DateFields::RaisedResolved {
                raised: raised_field.into(),
                resolved: resolved_field.into(),
            },
            client_field: client_field.into(),
            count_field: None,
        }
    }

    pub fn with_count(mut self, count_field: impl Into<String>) -> Self {
        self.count_field = Some(count_field.into());
        self
    }

    /// Pair the primary date with a resolution date. No effect on a
    /// raised/resolved mapping, which already has one.
    pub fn with_resolved(mut self, resolved_field: impl Into<String>) -> Self {
        if let DateFields::Single { resolved, .. } = &mut self.dates {
            *resolved = Some(resolved_field.into());
        }
        self
    }

    /// Every configured column name, in declaration order
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = match &self.dates {
            DateFields::Single { date, resolved } => {
                let mut c = vec![date.as_str()];
                c.extend(resolved.as_deref());
                c
            }
            DateFields::RaisedResolved { raised, resolved } => {
                vec![raised.as_str(), resolved.as_str()]
            }
        };
        columns.push(self.client_field.as_str());
        columns.extend(self.count_field.as_deref());
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_filter_drops_placeholder_and_blank_rows() {
        let filter = DatasetKey::AlertTracking.filter();
        assert!(filter.matches(&RowRecord::from_pairs([(ALERT_TYPE, "Camera offline")])));
        assert!(!filter.matches(&RowRecord::from_pairs([(ALERT_TYPE, NO_ALERTS_MARKER)])));
        assert!(!filter.matches(&RowRecord::from_pairs([(ALERT_TYPE, "")])));
        assert!(!filter.matches(&RowRecord::from_pairs([(DATE, "2024-01-01")])));
    }

    #[test]
    fn test_video_filter_matches_substring() {
        let filter = DatasetKey::HistoricalVideoRequests.filter();
        assert!(filter.matches(&RowRecord::from_pairs([(
            SUB_REQUEST,
            "Urgent - Historical Video Request"
        )])));
        assert!(!filter.matches(&RowRecord::from_pairs([(SUB_REQUEST, "Live feed")])));
        assert!(!filter.matches(&RowRecord::default()));
    }

    #[test]
    fn test_catalogue_mappings_have_no_blank_columns() {
        for key in DatasetKey::ALL {
            assert!(key.mapping().columns().iter().all(|c| !c.is_empty()), "{key}");
        }
    }

    #[test]
    fn test_with_resolved_ignored_on_dual_mapping() {
        let mapping = FieldMapping::raised_resolved("a", "b", "c").with_resolved("z");
        assert_eq!(mapping.columns(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dataset_key_serializes_camel_case() {
        let json = serde_json::to_string(&DatasetKey::HistoricalVideoRequests).unwrap();
        assert_eq!(json, "\"historicalVideoRequests\"");
    }
}
