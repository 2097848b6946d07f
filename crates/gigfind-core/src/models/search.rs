use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{CoreError, CoreErrorKind, SearchFilters, SearchableRecord};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    pub free_text: String,
    pub filters: SearchFilters,
}

impl QueryState {
    pub fn new(free_text: impl Into<String>, filters: SearchFilters) -> Self {
        Self {
            free_text: free_text.into(),
            filters,
        }
    }

    pub fn has_free_text(&self) -> bool {
        !self.free_text.trim().is_empty()
    }
}

/// Records that passed every predicate, borrowed from the catalog in
/// catalog order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub records: Vec<&'a SearchableRecord>,
}

impl<'a> MatchResult<'a> {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SearchableRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn titles(&self) -> Vec<&'a str> {
        self.records
            .iter()
            .map(|record| record.title.as_str())
            .collect()
    }

    /// Stable reordering for display. The engine's own order is `Relevance`.
    pub fn sorted(&self, order: SortOrder) -> MatchResult<'a> {
        let mut records = self.records.clone();
        match order {
            SortOrder::Relevance => {}
            SortOrder::PriceLow => records.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHigh => records.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortOrder::Rating => records.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
        MatchResult { records }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
            SortOrder::Rating => "rating",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "" | "relevance" => Ok(SortOrder::Relevance),
            "price-low" => Ok(SortOrder::PriceLow),
            "price-high" => Ok(SortOrder::PriceHigh),
            "rating" => Ok(SortOrder::Rating),
            other => Err(CoreError::new(
                CoreErrorKind::InvalidInput,
                format!("unknown sort order '{other}'"),
            )),
        }
    }
}

/// Up to a handful of distinct type-ahead strings, in first-seen order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionSet(pub Vec<String>);

impl SuggestionSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
