use serde::{Deserialize, Serialize};

/// Upper bound of the price range when no budget has been chosen.
pub const DEFAULT_MAX_PRICE: f64 = 50_000.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub location: Option<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub min_rating: f64,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self::with_price_ceiling(DEFAULT_MAX_PRICE)
    }
}

impl SearchFilters {
    pub fn with_price_ceiling(max_price: f64) -> Self {
        Self {
            category: None,
            location: None,
            min_price: 0.0,
            max_price,
            min_rating: 0.0,
        }
    }

    /// The category filter, treating an empty string the same as unset.
    pub fn active_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|value| !value.is_empty())
    }

    pub fn active_location(&self) -> Option<&str> {
        self.location.as_deref().filter(|value| !value.is_empty())
    }

    /// Shallow merge: fields the patch leaves unset keep their current value.
    pub fn apply(&mut self, patch: &FilterPatch) {
        if let Some(category) = &patch.category {
            self.category = non_empty(category);
        }
        if let Some(location) = &patch.location {
            self.location = non_empty(location);
        }
        if let Some(min_price) = patch.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = patch.max_price {
            self.max_price = max_price;
        }
        if let Some(min_rating) = patch.min_rating {
            self.min_rating = min_rating;
        }
    }

    pub fn merged(&self, patch: &FilterPatch) -> Self {
        let mut merged = self.clone();
        merged.apply(patch);
        merged
    }

    /// Number of filter fields holding a non-default value. A numeric field
    /// counts as unset when it is 0 or `price_ceiling`, whichever field it is.
    pub fn active_count(&self, price_ceiling: f64) -> usize {
        let is_set = |value: f64| value != 0.0 && value != price_ceiling;
        [
            self.active_category().is_some(),
            self.active_location().is_some(),
            is_set(self.min_price),
            is_set(self.max_price),
            is_set(self.min_rating),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Partial filter update. `Some("")` for category or location clears it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPatch {
    pub category: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
}

pub const ALL_CATEGORIES: &str = "All Categories";
pub const ALL_LOCATIONS: &str = "All Locations";

impl FilterPatch {
    pub fn category(value: impl Into<String>) -> Self {
        Self {
            category: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn location(value: impl Into<String>) -> Self {
        Self {
            location: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn min_rating(value: f64) -> Self {
        Self {
            min_rating: Some(value),
            ..Self::default()
        }
    }

    pub fn price_range(min_price: f64, max_price: f64) -> Self {
        Self {
            min_price: Some(min_price),
            max_price: Some(max_price),
            ..Self::default()
        }
    }

    pub fn budget(preset: BudgetPreset) -> Self {
        let (min_price, max_price) = preset.range();
        Self::price_range(min_price, max_price)
    }

    /// Category picked from a selector; the "All Categories" entry clears it.
    pub fn category_selection(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::category("")
        } else {
            Self::category(value)
        }
    }

    pub fn location_selection(value: &str) -> Self {
        if value == ALL_LOCATIONS {
            Self::location("")
        } else {
            Self::location(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPreset {
    Any,
    Under500,
    From500To2000,
    From2000To5000,
    From5000To10000,
    Over10000,
}

impl BudgetPreset {
    pub const ALL: [BudgetPreset; 6] = [
        BudgetPreset::Any,
        BudgetPreset::Under500,
        BudgetPreset::From500To2000,
        BudgetPreset::From2000To5000,
        BudgetPreset::From5000To10000,
        BudgetPreset::Over10000,
    ];

    pub fn range(self) -> (f64, f64) {
        match self {
            BudgetPreset::Any => (0.0, DEFAULT_MAX_PRICE),
            BudgetPreset::Under500 => (0.0, 500.0),
            BudgetPreset::From500To2000 => (500.0, 2_000.0),
            BudgetPreset::From2000To5000 => (2_000.0, 5_000.0),
            BudgetPreset::From5000To10000 => (5_000.0, 10_000.0),
            BudgetPreset::Over10000 => (10_000.0, DEFAULT_MAX_PRICE),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetPreset::Any => "Any Budget",
            BudgetPreset::Under500 => "Under 500 ETB",
            BudgetPreset::From500To2000 => "500 - 2,000 ETB",
            BudgetPreset::From2000To5000 => "2,000 - 5,000 ETB",
            BudgetPreset::From5000To10000 => "5,000 - 10,000 ETB",
            BudgetPreset::Over10000 => "10,000+ ETB",
        }
    }

    /// Preset whose range matches `filters` exactly, if any.
    pub fn matching(filters: &SearchFilters) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.range() == (filters.min_price, filters.max_price))
    }
}

#[cfg(test)]
mod tests {
    use super::{BudgetPreset, DEFAULT_MAX_PRICE, FilterPatch, SearchFilters};

    #[test]
    fn patch_keeps_unspecified_fields() {
        let mut filters = SearchFilters::default();
        filters.apply(&FilterPatch::category("Design"));
        filters.apply(&FilterPatch::min_rating(4.5));

        assert_eq!(filters.category.as_deref(), Some("Design"));
        assert_eq!(filters.min_rating, 4.5);
        assert_eq!(filters.max_price, DEFAULT_MAX_PRICE);
    }

    #[test]
    fn empty_category_clears_filter() {
        let mut filters = SearchFilters::default();
        filters.apply(&FilterPatch::category("Design"));
        filters.apply(&FilterPatch::category_selection("All Categories"));
        assert_eq!(filters.category, None);
    }

    #[test]
    fn active_count_ignores_defaults() {
        let mut filters = SearchFilters::default();
        assert_eq!(filters.active_count(DEFAULT_MAX_PRICE), 0);

        filters.apply(&FilterPatch::budget(BudgetPreset::From500To2000));
        filters.apply(&FilterPatch::location("Bole"));
        assert_eq!(filters.active_count(DEFAULT_MAX_PRICE), 3);
        assert_eq!(
            BudgetPreset::matching(&filters),
            Some(BudgetPreset::From500To2000)
        );
    }

    #[test]
    fn zero_or_ceiling_values_never_count_as_active() {
        let mut filters = SearchFilters::default();
        filters.apply(&FilterPatch::price_range(DEFAULT_MAX_PRICE, 0.0));
        assert_eq!(filters.active_count(DEFAULT_MAX_PRICE), 0);

        filters.apply(&FilterPatch::budget(BudgetPreset::Under500));
        assert_eq!(filters.active_count(DEFAULT_MAX_PRICE), 1);
    }
}
