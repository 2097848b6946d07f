pub mod predicates;
pub mod suggestions;

pub use predicates::{
    matches_category, matches_free_text, matches_location, matches_price, matches_rating,
};
pub use suggestions::{MIN_SUGGESTION_CHARS, SUGGESTION_LIMIT, SuggestionRules, suggest};

use crate::catalog::RecordStore;
use crate::models::{MatchResult, QueryState, SearchFilters, SearchableRecord};

/// Filters the store down to the records passing every predicate.
///
/// This is a stable filter, not a ranker: survivors keep catalog order and
/// nothing is cached between calls.
pub fn search<'a>(store: &'a RecordStore, query: &QueryState) -> MatchResult<'a> {
    search_with(store, &query.free_text, &query.filters)
}

pub fn search_with<'a>(
    store: &'a RecordStore,
    free_text: &str,
    filters: &SearchFilters,
) -> MatchResult<'a> {
    let needle = normalize_needle(free_text);
    let records = store
        .records()
        .iter()
        .filter(|record| record_matches(record, needle.as_deref(), filters))
        .collect();

    MatchResult { records }
}

pub fn record_matches(
    record: &SearchableRecord,
    needle: Option<&str>,
    filters: &SearchFilters,
) -> bool {
    matches_free_text(record, needle)
        && matches_category(record, filters.active_category())
        && matches_location(record, filters.active_location())
        && matches_price(record, filters.min_price, filters.max_price)
        && matches_rating(record, filters.min_rating)
}

/// Lowercased free text, or `None` when it is blank and matches everything.
pub fn normalize_needle(free_text: &str) -> Option<String> {
    if free_text.trim().is_empty() {
        None
    } else {
        Some(free_text.to_lowercase())
    }
}
