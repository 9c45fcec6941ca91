//! Record aggregator

use std::{collections::BTreeMap, num::IntErrorKind};

use crate::models::{
    dataset::{DateFields, FieldMapping},
    row::RowRecord,
    summary::{DualSummary, Summary},
};

use super::{dates, statistics, AggregationError};

const UNKNOWN_CLIENT: &str = "Unknown";

/// Running total plus its per-month split
#[derive(Default)]
struct MonthlyTally {
    total: u64,
    monthly: BTreeMap<String, u64>,
}

impl MonthlyTally {
    fn add(&mut self, month: &str, count: u64) {
        self.total = self.total.saturating_add(count);
        let slot = self.monthly.entry(month.to_string()).or_insert(0);
        *slot = slot.saturating_add(count);
    }
}

fn add_client(
    breakdown: &mut BTreeMap<String, BTreeMap<String, u64>>,
    month: &str,
    client: &str,
    count: u64,
) {
    let slot = breakdown
        .entry(month.to_string())
        .or_default()
        .entry(client.to_string())
        .or_insert(0);
    *slot = slot.saturating_add(count);
}

/// Lenient integer parse: optional sign and leading digits, anything else
/// reads as 0. Negative counts clamp to 0, oversized ones to `u64::MAX`.
fn parse_count(cell: &str) -> u64 {
    let cell = cell.trim_start();
    let (negative, digits) = match cell.as_bytes().first() {
        Some(b'-') => (true, &cell[1..]),
        Some(b'+') => (false, &cell[1..]),
        _ => (false, cell),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<u64>() {
        _ if negative => 0,
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(_) => 0,
    }
}

fn row_count(row: &RowRecord, mapping: &FieldMapping) -> u64 {
    match &mapping.count_field {
        Some(column) => row.get(column).map(parse_count).unwrap_or(0),
        None => 1,
    }
}

fn client_of<'a>(row: &'a RowRecord, mapping: &FieldMapping) -> &'a str {
    row.non_empty(&mapping.client_field).unwrap_or(UNKNOWN_CLIENT)
}

fn elapsed(row: &RowRecord, start: &str, end: &str) -> Option<f64> {
    dates::elapsed_hours(row.get(start)?, row.get(end)?)
}

fn check_columns(mapping: &FieldMapping) -> Result<(), AggregationError> {
    if mapping.columns().iter().any(|c| c.trim().is_empty()) {
        return Err(AggregationError::BlankColumn);
    }
    Ok(())
}

/// Aggregate a single-date dataset.
///
/// Rows whose date does not parse are left out of the total and of both
/// breakdowns. They can still contribute a resolution time when the mapping
/// pairs the date with a resolved column and both ends parse.
pub fn aggregate(rows: &[RowRecord], mapping: &FieldMapping) -> Result<Summary, AggregationError> {
    let (date_field, resolved_field) = match &mapping.dates {
        DateFields::Single { date, resolved } => (date.as_str(), resolved.as_deref()),
        DateFields::RaisedResolved { .. } => {
            return Err(AggregationError::MappingMismatch {
                expected: "single-date",
                found: "raised/resolved",
            })
        }
    };
    check_columns(mapping)?;

    let mut tally = MonthlyTally::default();
    let mut client_breakdown = BTreeMap::new();
    let mut resolution_times = Vec::new();
    let mut undated = 0usize;

    for row in rows {
        match row.get(date_field).and_then(dates::month_bucket) {
            Some(month) => {
                let count = row_count(row, mapping);
                tally.add(&month, count);
                add_client(&mut client_breakdown, &month, client_of(row, mapping), count);
            }
            None => undated += 1,
        }

        if let Some(hours) = resolved_field.and_then(|end| elapsed(row, date_field, end)) {
            resolution_times.push(hours);
        }
    }

    if undated > 0 {
        tracing::debug!(column = date_field, undated, "Rows without a parseable date excluded");
    }

    Ok(Summary {
        total: tally.total,
        monthly_breakdown: tally.monthly,
        client_breakdown,
        resolution_stats: statistics::summarize(&resolution_times),
    })
}

/// Aggregate a dataset counted once on its raised date and once on its
/// resolved date. The client breakdown follows the raised month.
pub fn aggregate_dual(
    rows: &[RowRecord],
    mapping: &FieldMapping,
) -> Result<DualSummary, AggregationError> {
    let (raised_field, resolved_field) = match &mapping.dates {
        DateFields::RaisedResolved { raised, resolved } => (raised.as_str(), resolved.as_str()),
        DateFields::Single { .. } => {
            return Err(AggregationError::MappingMismatch {
                expected: "raised/resolved",
                found: "single-date",
            })
        }
    };
    check_columns(mapping)?;

    let mut raised = MonthlyTally::default();
    let mut closed = MonthlyTally::default();
    let mut client_breakdown = BTreeMap::new();
    let mut resolution_times = Vec::new();
    let mut undated = 0usize;

    for row in rows {
        let count = row_count(row, mapping);

        match row.get(raised_field).and_then(dates::month_bucket) {
            Some(month) => {
                raised.add(&month, count);
                add_client(&mut client_breakdown, &month, client_of(row, mapping), count);
            }
            None => undated += 1,
        }

        if let Some(month) = row.get(resolved_field).and_then(dates::month_bucket) {
            closed.add(&month, count);
        }

        if let Some(hours) = elapsed(row, raised_field, resolved_field) {
            resolution_times.push(hours);
        }
    }

    if undated > 0 {
        tracing::debug!(column = raised_field, undated, "Rows without a parseable raised date excluded");
    }

    Ok(DualSummary {
        total_raised: raised.total,
        total_closed: closed.total,
        monthly_raised: raised.monthly,
        monthly_closed: closed.monthly,
        client_breakdown,
        resolution_stats: statistics::summarize(&resolution_times),
    })
}
