//! Free-text and category filtering over the record collection.

use crate::models::{Query, Record};

/// Filter records by search term and category, preserving input order.
///
/// The search term is matched case-insensitively as a substring of the
/// record's name, city, region or country; an empty term matches every
/// record. The category predicate is ANDed with the text match.
pub fn filter_records<'a, I>(records: I, query: &Query) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let needle = query.search_term.to_lowercase();

    let filtered: Vec<&Record> = records
        .into_iter()
        .filter(|record| matches_text(record, &needle) && query.category.matches(record))
        .collect();

    tracing::debug!(
        term = %query.search_term,
        category = %query.category,
        matched = filtered.len(),
        "Filtered records"
    );

    filtered
}

/// Check a record against an already-lowercased search term
fn matches_text(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}
