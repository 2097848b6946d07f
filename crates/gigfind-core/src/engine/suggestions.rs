use std::collections::HashSet;

use crate::catalog::RecordStore;
use crate::engine::predicates::contains_folded;
use crate::models::SuggestionSet;

pub const SUGGESTION_LIMIT: usize = 5;
pub const MIN_SUGGESTION_CHARS: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SuggestionRules {
    pub limit: usize,
    pub min_chars: usize,
}

impl Default for SuggestionRules {
    fn default() -> Self {
        Self {
            limit: SUGGESTION_LIMIT,
            min_chars: MIN_SUGGESTION_CHARS,
        }
    }
}

/// Type-ahead candidates for `free_text`.
///
/// Candidates are visited per record as title, tags, then category, and
/// finally the static `vocabulary`. Duplicates collapse onto their first
/// occurrence; comparison for duplicates is exact, so "design" and "Design"
/// are distinct entries.
pub fn suggest(
    free_text: &str,
    store: &RecordStore,
    vocabulary: &[String],
    rules: SuggestionRules,
) -> SuggestionSet {
    if free_text.trim().is_empty() || free_text.chars().count() < rules.min_chars {
        return SuggestionSet::default();
    }

    let needle = free_text.to_lowercase();
    let candidates = store
        .records()
        .iter()
        .flat_map(|record| {
            std::iter::once(&record.title)
                .chain(record.tags.iter())
                .chain(std::iter::once(&record.category))
        })
        .chain(vocabulary.iter());

    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();
    for candidate in candidates {
        if suggestions.len() == rules.limit {
            break;
        }
        if contains_folded(candidate, &needle) && seen.insert(candidate.as_str()) {
            suggestions.push(candidate.clone());
        }
    }

    SuggestionSet(suggestions)
}
