//! Case-insensitive substring search across record fields

use crate::record::{Record, field_text};

/// Filter records by a free-text query
///
/// An empty query returns every record unchanged. Otherwise a record is kept
/// when at least one of its field values, lower-cased, contains the
/// lower-cased query. Null values never match. Source order is preserved.
///
/// The query is used exactly as typed: no trimming and no whitespace or
/// punctuation normalization.
pub fn filter_records(records: &[Record], query: &str) -> Vec<Record> {
    if query.is_empty() {
        return records.to_vec();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| contains_lowered(record, &needle))
        .cloned()
        .collect()
}

/// Check whether a single record matches the query
pub fn record_matches(record: &Record, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    contains_lowered(record, &query.to_lowercase())
}

fn contains_lowered(record: &Record, needle: &str) -> bool {
    record
        .values()
        .filter_map(field_text)
        .any(|text| text.to_lowercase().contains(needle))
}
