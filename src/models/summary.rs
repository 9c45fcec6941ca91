//! Aggregated dataset summaries

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Min, median and max resolution time in hours
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct ResolutionStats {
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Summary of a dataset bucketed on a single date column
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Events with a parseable date
    pub total: u64,
    /// Events per `YYYY-MM` month
    pub monthly_breakdown: BTreeMap<String, u64>,
    /// Events per month, then per client
    pub client_breakdown: BTreeMap<String, BTreeMap<String, u64>>,
    /// Resolution time statistics, zeros when nothing could be measured
    pub resolution_stats: ResolutionStats,
}

/// Summary of a dataset counted on both its raised and resolved dates
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DualSummary {
    pub total_raised: u64,
    pub total_closed: u64,
    /// Issues per raised month
    pub monthly_raised: BTreeMap<String, u64>,
    /// Issues per resolved month
    pub monthly_closed: BTreeMap<String, u64>,
    /// Issues per raised month, then per client
    pub client_breakdown: BTreeMap<String, BTreeMap<String, u64>>,
    pub resolution_stats: ResolutionStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_summary_is_fully_formed() {
        let value = serde_json::to_value(Summary::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "total": 0,
                "monthlyBreakdown": {},
                "clientBreakdown": {},
                "resolutionStats": { "min": 0.0, "median": 0.0, "max": 0.0 }
            })
        );
    }

    #[test]
    fn test_dual_summary_field_names() {
        let value = serde_json::to_value(DualSummary::default()).unwrap();
        for key in [
            "totalRaised",
            "totalClosed",
            "monthlyRaised",
            "monthlyClosed",
            "clientBreakdown",
            "resolutionStats",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
