//! Comma-delimited feed parsing.
//!
//! The first line of a feed is a header and is always discarded. Every
//! remaining line becomes one [`TimeSeriesPoint`] unless it has too few
//! columns, in which case it is dropped. Parsing never fails: a total that
//! is not a number becomes `0`.

use csv::{ReaderBuilder, StringRecord};

use crate::catalog::{self, ColumnLayout};
use crate::models::TimeSeriesPoint;

/// Largest total kept; larger values saturate here so every total
/// converts to `f64` exactly.
pub const MAX_TOTAL: u64 = (1 << 53) - 1;

/// Parse a feed for the given metric id.
///
/// Unknown metric ids yield an empty sequence.
pub fn parse(raw: &str, metric: &str) -> Vec<TimeSeriesPoint> {
    match catalog::metric(metric) {
        Some(descriptor) => parse_with_layout(raw, descriptor.columns),
        None => {
            tracing::debug!(metric, "no descriptor for metric; feed ignored");
            Vec::new()
        }
    }
}

/// Parse a feed reading the date and total from the given columns.
pub fn parse_with_layout(raw: &str, layout: ColumnLayout) -> Vec<TimeSeriesPoint> {
    let min_columns = layout.min_columns();

    // The header is the first physical line, even when it is blank.
    let body = raw.split_once('\n').map_or("", |(_, rest)| rest);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(body.as_bytes());

    reader
        .records()
        .filter_map(|record| record.ok())
        .filter(|record| record.len() >= min_columns)
        .map(|record| to_point(&record, layout))
        .collect()
}

fn to_point(record: &StringRecord, layout: ColumnLayout) -> TimeSeriesPoint {
    TimeSeriesPoint {
        date: record.get(layout.date).unwrap_or_default().to_string(),
        total: parse_total(record.get(layout.value).unwrap_or_default()),
    }
}

/// Read the leading base-10 integer of a field.
///
/// Leading whitespace and a `+` sign are accepted and parsing stops at the
/// first non-digit, so `"150.7"` reads as `150`. Empty, non-numeric and
/// negative fields read as `0`; values above [`MAX_TOTAL`] saturate.
pub fn parse_total(field: &str) -> u64 {
    let s = field.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = unsigned
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if negative || digits.is_empty() {
        return 0;
    }

    digits
        .bytes()
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
        .min(MAX_TOTAL)
}
