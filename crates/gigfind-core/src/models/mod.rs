pub mod error;
pub mod filters;
pub mod listing;
pub mod search;

pub use error::{CoreError, CoreErrorKind};
pub use filters::{
    ALL_CATEGORIES, ALL_LOCATIONS, BudgetPreset, DEFAULT_MAX_PRICE, FilterPatch, SearchFilters,
};
pub use listing::{ListingKind, RecordId, SearchableRecord};
pub use search::{MatchResult, QueryState, SortOrder, SuggestionSet};
