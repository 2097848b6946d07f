pub mod debounce;

pub use debounce::DebounceTimer;

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::catalog::Catalog;
use crate::engine::{self, SuggestionRules};
use crate::models::{
    DEFAULT_MAX_PRICE, FilterPatch, MatchResult, QueryState, SearchFilters, SortOrder,
    SuggestionSet,
};

pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub debounce_window: Duration,
    /// `max_price` used by fresh and cleared filters.
    pub price_ceiling: f64,
    pub suggestions: SuggestionRules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            price_ceiling: DEFAULT_MAX_PRICE,
            suggestions: SuggestionRules::default(),
        }
    }
}

impl SessionConfig {
    pub fn default_filters(&self) -> SearchFilters {
        SearchFilters::with_price_ceiling(self.price_ceiling)
    }
}

/// Owns the query state of one search UI session.
///
/// Every mutation is synchronous and results are derived from the current
/// state on each read. The debounce timer only drives [`Self::is_searching`].
pub struct SearchSession {
    catalog: Arc<Catalog>,
    config: SessionConfig,
    state: QueryState,
    timer: DebounceTimer,
}

impl SearchSession {
    pub fn new(catalog: Arc<Catalog>, runtime: Handle) -> Self {
        Self::with_config(catalog, SessionConfig::default(), runtime)
    }

    pub fn with_config(catalog: Arc<Catalog>, config: SessionConfig, runtime: Handle) -> Self {
        Self {
            catalog,
            state: QueryState::new("", config.default_filters()),
            timer: DebounceTimer::new(config.debounce_window, runtime),
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn free_text(&self) -> &str {
        &self.state.free_text
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.state.filters
    }

    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.state.free_text = text.into();
        self.restart_busy_signal();
        tracing::debug!(
            free_text = %self.state.free_text,
            matches = self.results().count(),
            "free text changed"
        );
    }

    pub fn update_filters(&mut self, patch: &FilterPatch) {
        self.state.filters.apply(patch);
        tracing::debug!(
            filters = ?self.state.filters,
            matches = self.results().count(),
            "filters updated"
        );
    }

    /// Replaces free text and filters in one step.
    pub fn perform_search(&mut self, text: impl Into<String>, filters: SearchFilters) {
        self.state = QueryState::new(text, filters);
        self.restart_busy_signal();
        tracing::debug!(
            free_text = %self.state.free_text,
            matches = self.results().count(),
            "search performed"
        );
    }

    pub fn clear(&mut self) {
        self.state = QueryState::new("", self.config.default_filters());
        self.timer.cancel();
        tracing::debug!("search cleared");
    }

    pub fn results(&self) -> MatchResult<'_> {
        engine::search(&self.catalog.store, &self.state)
    }

    pub fn sorted_results(&self, order: SortOrder) -> MatchResult<'_> {
        self.results().sorted(order)
    }

    pub fn total_results(&self) -> usize {
        self.results().count()
    }

    pub fn has_results(&self) -> bool {
        !self.results().is_empty()
    }

    pub fn suggestions(&self) -> SuggestionSet {
        engine::suggest(
            &self.state.free_text,
            &self.catalog.store,
            &self.catalog.categories,
            self.config.suggestions,
        )
    }

    pub fn active_filter_count(&self) -> usize {
        self.state.filters.active_count(self.config.price_ceiling)
    }

    pub fn is_searching(&self) -> bool {
        self.timer.is_busy()
    }

    pub fn searching_signal(&self) -> watch::Receiver<bool> {
        self.timer.subscribe()
    }

    pub async fn wait_until_idle(&self) {
        self.timer.wait_until_idle().await;
    }

    fn restart_busy_signal(&mut self) {
        if self.state.has_free_text() {
            self.timer.schedule();
        } else {
            self.timer.cancel();
        }
    }
}
