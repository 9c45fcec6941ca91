//! Lenient ISO-8601 date handling for spreadsheet cells.
//!
//! Cells are free text, so every function here returns `None` instead of
//! failing. Timestamps with an offset are normalized to UTC, timestamps
//! without one are taken at face value.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM`, `YYYY-MM-DD`, or a date followed by `T`/space and a clock time
/// with optional seconds, fraction and `Z`/`±HH[:MM]` offset.
static ISO_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}(?:-[0-9]{2}(?:[T ][0-9]{2}:[0-9]{2}(?::[0-9]{2}(?:[.,][0-9]+)?)?(?:Z|[+-][0-9]{2}(?::?[0-9]{2})?)?)?)?$",
    )
    .expect("date shape pattern is valid")
});

const CLOCK_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parse a date or date-time cell
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if !ISO_SHAPE.is_match(text) {
        return None;
    }

    // ASCII-only digit classes keep the byte slicing below on char boundaries.
    if text.len() == 7 {
        let date = NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d").ok()?;
        return date.and_hms_opt(0, 0, 0);
    }

    let date = NaiveDate::parse_from_str(&text[..10], "%Y-%m-%d").ok()?;
    if text.len() == 10 {
        return date.and_hms_opt(0, 0, 0);
    }

    let (clock, offset_seconds) = split_offset(&text[11..])?;
    let clock = clock.replace(',', ".");
    let time = CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&clock, format).ok())?;

    date.and_time(time)
        .checked_sub_signed(Duration::try_seconds(offset_seconds)?)
}

/// Separate the clock from a trailing `Z` / `±HH[:MM]` offset
fn split_offset(rest: &str) -> Option<(&str, i64)> {
    if let Some(clock) = rest.strip_suffix('Z') {
        return Some((clock, 0));
    }

    let Some(idx) = rest.rfind(|c: char| c == '+' || c == '-') else {
        return Some((rest, 0));
    };

    let (clock, offset) = rest.split_at(idx);
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits = offset[1..].replace(':', "");
    let hours: i64 = digits.get(..2)?.parse().ok()?;
    let minutes: i64 = match digits.get(2..) {
        Some("") | None => 0,
        Some(m) => m.parse().ok()?,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some((clock, sign * (hours * 3600 + minutes * 60)))
}

/// `YYYY-MM` bucket of a date cell
pub fn month_bucket(text: &str) -> Option<String> {
    parse_date(text).map(|date| date.format("%Y-%m").to_string())
}

/// Absolute time between two date cells, in fractional hours
pub fn elapsed_hours(start: &str, end: &str) -> Option<f64> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    let millis = end.signed_duration_since(start).num_milliseconds().abs();
    Some(millis as f64 / 3_600_000.0)
}
