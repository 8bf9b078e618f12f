//! Free-text search over every value of a record.

use crate::record::Record;

/// Case-insensitive substring match against any stringified value.
/// `needle` must already be lowercase.
pub fn matches_search<T: Record>(record: &T, needle: &str) -> bool {
    record
        .values()
        .iter()
        .any(|v| v.to_string().to_lowercase().contains(needle))
}

/// An empty term keeps every record.
pub fn search_records<'a, T: Record>(records: &[&'a T], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .copied()
        .filter(|r| matches_search(*r, &needle))
        .collect()
}
