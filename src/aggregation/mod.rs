//! Aggregation pipeline: row records in, dataset summaries out.
//!
//! Everything in here is synchronous and side-effect free apart from
//! tracing output.

pub mod aggregator;
pub mod dates;
pub mod statistics;

pub use aggregator::{aggregate, aggregate_dual};

use thiserror::Error;

/// Caller-side mistakes in how the aggregator is configured
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("expected a {expected} field mapping, got {found}")]
    MappingMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("field mapping has a blank column name")]
    BlankColumn,
}
