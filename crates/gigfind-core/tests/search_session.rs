use std::sync::Arc;
use std::time::Duration;

use gigfind_core::catalog::Catalog;
use gigfind_core::models::{
    BudgetPreset, DEFAULT_MAX_PRICE, FilterPatch, SearchFilters, SortOrder,
};
use gigfind_core::session::{SearchSession, SessionConfig};
use tokio::runtime::Handle;

fn session() -> SearchSession {
    SearchSession::new(Arc::new(Catalog::builtin()), Handle::current())
}

#[tokio::test]
async fn new_session_starts_with_defaults_and_full_results() {
    let session = session();

    assert_eq!(session.free_text(), "");
    assert_eq!(session.filters(), &SearchFilters::default());
    assert_eq!(session.total_results(), 8);
    assert!(session.has_results());
    assert!(session.suggestions().is_empty());
    assert!(!session.is_searching());
    assert_eq!(session.active_filter_count(), 0);
}

#[tokio::test]
async fn free_text_updates_results_and_suggestions_immediately() {
    let mut session = session();
    session.set_free_text("design");

    assert_eq!(
        session.results().titles(),
        vec!["Professional Logo Design", "Mobile App Development"]
    );
    assert_eq!(session.suggestions().len(), 4);
}

#[tokio::test]
async fn update_filters_merges_partial_patches() {
    let mut session = session();
    session.update_filters(&FilterPatch::category("Photography"));
    session.update_filters(&FilterPatch::min_rating(4.5));

    assert_eq!(session.filters().category.as_deref(), Some("Photography"));
    assert_eq!(session.filters().min_rating, 4.5);
    assert_eq!(session.filters().max_price, DEFAULT_MAX_PRICE);
    assert_eq!(session.results().titles(), vec!["Photography Services"]);
    assert_eq!(session.active_filter_count(), 2);

    session.update_filters(&FilterPatch::category_selection("All Categories"));
    assert_eq!(session.filters().category, None);
    assert_eq!(session.total_results(), 8);
}

#[tokio::test]
async fn filter_updates_leave_suggestions_alone() {
    let mut session = session();
    session.set_free_text("photo");
    let before = session.suggestions();

    session.update_filters(&FilterPatch::category("Design"));
    assert_eq!(session.suggestions(), before);
    assert_eq!(session.total_results(), 0);
}

#[tokio::test]
async fn inverted_budget_silently_empties_results() {
    let mut session = session();
    session.update_filters(&FilterPatch::price_range(10_000.0, 500.0));
    assert_eq!(session.total_results(), 0);
    assert!(!session.has_results());

    session.set_free_text("design");
    assert_eq!(session.total_results(), 0);
}

#[tokio::test]
async fn perform_search_replaces_text_and_filters_together() {
    let mut session = session();
    session.set_free_text("video");
    session.update_filters(&FilterPatch::location("Mexico"));

    let filters = SearchFilters::default().merged(&FilterPatch::budget(BudgetPreset::Under500));
    session.perform_search("services", filters.clone());

    assert_eq!(session.free_text(), "services");
    assert_eq!(session.filters(), &filters);
    assert_eq!(session.results().titles(), vec!["Content Writing Services", "Translation Services"]);
}

#[tokio::test]
async fn clear_restores_configured_defaults() {
    let config = SessionConfig {
        price_ceiling: 20_000.0,
        ..SessionConfig::default()
    };
    let mut session =
        SearchSession::with_config(Arc::new(Catalog::builtin()), config, Handle::current());

    session.set_free_text("marketing");
    session.update_filters(&FilterPatch {
        category: Some("Marketing".to_string()),
        location: Some("Arat Kilo".to_string()),
        min_price: Some(100.0),
        max_price: Some(4000.0),
        min_rating: Some(4.0),
    });
    assert_eq!(session.active_filter_count(), 5);

    session.clear();
    assert_eq!(session.free_text(), "");
    assert_eq!(session.filters(), &SearchFilters::with_price_ceiling(20_000.0));
    assert_eq!(session.active_filter_count(), 0);
    assert!(!session.is_searching());
    assert_eq!(session.total_results(), 8);
}

#[tokio::test]
async fn sorted_results_do_not_touch_engine_order() {
    let mut session = session();
    session.set_free_text("services");

    let sorted = session.sorted_results(SortOrder::PriceLow);
    assert_eq!(
        sorted.titles(),
        vec!["Translation Services", "Content Writing Services", "Photography Services"]
    );
    assert_eq!(
        session.results().titles(),
        vec!["Content Writing Services", "Photography Services", "Translation Services"]
    );
}

#[tokio::test(start_paused = true)]
async fn busy_flag_drops_after_debounce_window() {
    let mut session = session();
    session.set_free_text("design");
    assert!(session.is_searching());

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(session.is_searching());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!session.is_searching());
}

#[tokio::test(start_paused = true)]
async fn new_text_within_window_restarts_the_timer() {
    let mut session = session();
    session.set_free_text("de");
    tokio::time::sleep(Duration::from_millis(200)).await;

    session.set_free_text("des");
    assert_eq!(session.total_results(), 2);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(session.is_searching());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!session.is_searching());
}

#[tokio::test(start_paused = true)]
async fn blank_text_and_clear_cancel_the_busy_flag() {
    let mut session = session();
    session.set_free_text("video");
    assert!(session.is_searching());
    session.set_free_text("   ");
    assert!(!session.is_searching());

    session.set_free_text("video");
    session.clear();
    assert!(!session.is_searching());

    // A cancelled timer must not fire later and flip anything.
    let signal = session.searching_signal();
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!*signal.borrow());
}

#[tokio::test(start_paused = true)]
async fn wait_until_idle_resolves_after_window() {
    let mut session = session();
    let started = tokio::time::Instant::now();
    session.perform_search("photo", SearchFilters::default());

    session.wait_until_idle().await;
    assert!(!session.is_searching());
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn filter_updates_do_not_raise_busy_flag() {
    let mut session = session();
    session.update_filters(&FilterPatch::min_rating(4.9));
    assert!(!session.is_searching());
    assert_eq!(session.total_results(), 3);
}
