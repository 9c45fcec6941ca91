//! Data models for the ops dashboard

pub mod dataset;
pub mod row;
pub mod summary;

// Re-export commonly used types
pub use dataset::{DatasetKey, DateFields, FieldMapping, RowFilter};
pub use row::RowRecord;
pub use summary::{DualSummary, ResolutionStats, Summary};
