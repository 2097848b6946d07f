use std::ffi::{CStr, CString};
use std::sync::{Arc, Mutex, MutexGuard};

use gigfind_core::catalog::{Catalog, load_catalog};
use gigfind_core::models::{BudgetPreset, FilterPatch, SearchFilters, SearchableRecord, SortOrder};
use gigfind_core::session::SearchSession;
use lazy_static::lazy_static;
use libc::c_char;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

struct GigFindState {
    session: SearchSession,
    _tokio_rt: tokio::runtime::Runtime,
}

lazy_static! {
    static ref STATE: Mutex<Option<GigFindState>> = Mutex::new(None);
}

#[derive(Serialize)]
struct ResultsPayload<'a> {
    query: &'a str,
    filters: &'a SearchFilters,
    count: usize,
    active_filters: usize,
    searching: bool,
    results: Vec<&'a SearchableRecord>,
}

#[derive(Serialize)]
struct BudgetPayload {
    id: BudgetPreset,
    label: &'static str,
    min_price: f64,
    max_price: f64,
}

#[derive(Serialize)]
struct VocabularyPayload<'a> {
    categories: Vec<String>,
    locations: Vec<String>,
    popular_searches: &'a [String],
    budgets: Vec<BudgetPayload>,
}

/// Initialize the search session. A null `catalog_path` selects the built-in
/// catalog; otherwise the JSON catalog at that path is loaded.
///
/// # Safety
///
/// `catalog_path` must be null or a valid pointer to a NUL-terminated UTF-8 C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gigfind_init(catalog_path: *const c_char) -> bool {
    let Some(mut guard) = lock_state() else {
        return false;
    };
    if guard.is_some() {
        return true;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let catalog = if catalog_path.is_null() {
        Catalog::builtin()
    } else {
        let Some(path) = (unsafe { read_c_str(catalog_path) }) else {
            tracing::error!("catalog path is not valid UTF-8");
            return false;
        };
        match load_catalog(path) {
            Ok(catalog) => catalog,
            Err(error) => {
                tracing::error!(path, kind = ?error.kind, message = %error.message, "failed to load catalog");
                return false;
            }
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(error) => {
            tracing::error!(%error, "failed to create Tokio runtime");
            return false;
        }
    };

    let session = SearchSession::new(Arc::new(catalog), rt.handle().clone());
    *guard = Some(GigFindState {
        session,
        _tokio_rt: rt,
    });

    true
}

/// # Safety
///
/// `text` must be a valid pointer to a NUL-terminated UTF-8 C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gigfind_set_query(text: *const c_char) -> bool {
    let Some(text) = (unsafe { read_c_str(text) }) else {
        return false;
    };
    with_session(|session| session.set_free_text(text)).is_some()
}

/// Merge a JSON filter patch, e.g. `{"category": "Design", "min_rating": 4.5}`.
///
/// # Safety
///
/// `patch_json` must be a valid pointer to a NUL-terminated UTF-8 C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gigfind_update_filters(patch_json: *const c_char) -> bool {
    let Some(raw) = (unsafe { read_c_str(patch_json) }) else {
        return false;
    };
    let patch: FilterPatch = match serde_json::from_str(raw) {
        Ok(patch) => patch,
        Err(error) => {
            tracing::error!(%error, "malformed filter patch");
            return false;
        }
    };
    with_session(|session| session.update_filters(&patch)).is_some()
}

/// Replace query text and filters at once. A null `filters_json` keeps the
/// current filters.
///
/// # Safety
///
/// `text` must be a valid pointer to a NUL-terminated UTF-8 C string;
/// `filters_json` must be null or such a pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gigfind_perform_search(
    text: *const c_char,
    filters_json: *const c_char,
) -> bool {
    let Some(text) = (unsafe { read_c_str(text) }) else {
        return false;
    };
    let filters = if filters_json.is_null() {
        None
    } else {
        let Some(raw) = (unsafe { read_c_str(filters_json) }) else {
            return false;
        };
        match serde_json::from_str::<SearchFilters>(raw) {
            Ok(filters) => Some(filters),
            Err(error) => {
                tracing::error!(%error, "malformed search filters");
                return false;
            }
        }
    };

    with_session(|session| {
        let filters = filters.unwrap_or_else(|| session.filters().clone());
        session.perform_search(text, filters);
    })
    .is_some()
}

#[unsafe(no_mangle)]
pub extern "C" fn gigfind_clear() -> bool {
    with_session(|session| session.clear()).is_some()
}

#[unsafe(no_mangle)]
pub extern "C" fn gigfind_is_searching() -> bool {
    with_session(|session| session.is_searching()).unwrap_or(false)
}

/// Current results as JSON. `sort` is one of `relevance`, `price-low`,
/// `price-high`, `rating`; null means `relevance`.
///
/// # Safety
///
/// `sort` must be null or a valid pointer to a NUL-terminated UTF-8 C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gigfind_results(sort: *const c_char) -> *mut c_char {
    let order = if sort.is_null() {
        SortOrder::Relevance
    } else {
        let Some(raw) = (unsafe { read_c_str(sort) }) else {
            return std::ptr::null_mut();
        };
        match raw.parse::<SortOrder>() {
            Ok(order) => order,
            Err(error) => {
                tracing::error!(message = %error.message, "unsupported sort order");
                return std::ptr::null_mut();
            }
        }
    };

    with_session(|session| {
        let results = session.sorted_results(order);
        to_c_json(&ResultsPayload {
            query: session.free_text(),
            filters: session.filters(),
            count: results.count(),
            active_filters: session.active_filter_count(),
            searching: session.is_searching(),
            results: results.records,
        })
    })
    .unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn gigfind_suggestions() -> *mut c_char {
    with_session(|session| to_c_json(&session.suggestions())).unwrap_or(std::ptr::null_mut())
}

#[unsafe(no_mangle)]
pub extern "C" fn gigfind_vocabulary() -> *mut c_char {
    with_session(|session| {
        let catalog = session.catalog();
        to_c_json(&VocabularyPayload {
            categories: catalog.category_choices(),
            locations: catalog.location_choices(),
            popular_searches: &catalog.popular_searches,
            budgets: BudgetPreset::ALL
                .into_iter()
                .map(|preset| {
                    let (min_price, max_price) = preset.range();
                    BudgetPayload {
                        id: preset,
                        label: preset.label(),
                        min_price,
                        max_price,
                    }
                })
                .collect(),
        })
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a string previously returned by a `gigfind_*` function.
///
/// # Safety
///
/// `s` must be a pointer previously returned by a `gigfind_*` function, or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn gigfind_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(s);
    }
}

fn lock_state() -> Option<MutexGuard<'static, Option<GigFindState>>> {
    match STATE.lock() {
        Ok(guard) => Some(guard),
        Err(_) => {
            tracing::error!("gigfind state mutex poisoned");
            None
        }
    }
}

fn with_session<R>(operation: impl FnOnce(&mut SearchSession) -> R) -> Option<R> {
    let mut guard = lock_state()?;
    match guard.as_mut() {
        Some(state) => Some(operation(&mut state.session)),
        None => {
            tracing::warn!("gigfind_init has not been called");
            None
        }
    }
}

/// # Safety
///
/// `ptr` must be null or a valid pointer to a NUL-terminated C string that
/// outlives the returned slice.
unsafe fn read_c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn to_c_json<T: Serialize + ?Sized>(value: &T) -> *mut c_char {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(error) => {
            tracing::error!(%error, "failed to encode response");
            return std::ptr::null_mut();
        }
    };

    match CString::new(json) {
        Ok(c) => c.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::{CStr, CString};

    use super::*;

    fn take_json(ptr: *mut c_char) -> serde_json::Value {
        assert!(!ptr.is_null());
        let value = serde_json::from_str(unsafe { CStr::from_ptr(ptr) }.to_str().unwrap()).unwrap();
        unsafe { gigfind_free_string(ptr) };
        value
    }

    // One test drives the whole surface because the session is process-wide.
    #[test]
    fn search_surface_round_trip() {
        assert!(unsafe { gigfind_init(std::ptr::null()) });

        let query = CString::new("design").unwrap();
        assert!(unsafe { gigfind_set_query(query.as_ptr()) });
        assert!(gigfind_is_searching());

        let results = take_json(unsafe { gigfind_results(std::ptr::null()) });
        assert_eq!(results["count"], 2);
        assert_eq!(results["results"][0]["title"], "Professional Logo Design");

        let suggestions = take_json(gigfind_suggestions());
        assert_eq!(suggestions.as_array().unwrap().len(), 4);

        let patch = CString::new(r#"{"category": "Design"}"#).unwrap();
        assert!(unsafe { gigfind_update_filters(patch.as_ptr()) });
        let results = take_json(unsafe { gigfind_results(std::ptr::null()) });
        assert_eq!(results["count"], 1);
        assert_eq!(results["active_filters"], 1);

        let bad_patch = CString::new("{").unwrap();
        assert!(!unsafe { gigfind_update_filters(bad_patch.as_ptr()) });

        let text = CString::new("").unwrap();
        assert!(unsafe { gigfind_perform_search(text.as_ptr(), std::ptr::null()) });
        let results = take_json(unsafe { gigfind_results(std::ptr::null()) });
        assert_eq!(results["count"], 1);
        assert_eq!(results["results"][0]["title"], "Professional Logo Design");

        let defaults = CString::new("{}").unwrap();
        assert!(unsafe { gigfind_perform_search(text.as_ptr(), defaults.as_ptr()) });
        let sort = CString::new("price-high").unwrap();
        let results = take_json(unsafe { gigfind_results(sort.as_ptr()) });
        assert_eq!(results["count"], 8);
        assert_eq!(results["results"][0]["title"], "Mobile App Development");

        let vocabulary = take_json(gigfind_vocabulary());
        assert_eq!(vocabulary["categories"][0], "All Categories");
        assert_eq!(vocabulary["budgets"].as_array().unwrap().len(), 6);

        assert!(gigfind_clear());
        assert!(!gigfind_is_searching());

        let patch = CString::new(r#"{"category": "Design", "location": "Bole"}"#).unwrap();
        assert!(unsafe { gigfind_update_filters(patch.as_ptr()) });
        let text = CString::new("logo").unwrap();
        assert!(unsafe { gigfind_perform_search(text.as_ptr(), std::ptr::null()) });
        let results = take_json(unsafe { gigfind_results(std::ptr::null()) });
        assert_eq!(results["query"], "logo");
        assert_eq!(results["filters"]["category"], "Design");
        assert_eq!(results["filters"]["location"], "Bole");
        assert_eq!(results["count"], 1);

        let filters = CString::new(r#"{"min_rating": 4.9}"#).unwrap();
        assert!(unsafe { gigfind_perform_search(text.as_ptr(), filters.as_ptr()) });
        let results = take_json(unsafe { gigfind_results(std::ptr::null()) });
        assert_eq!(results["filters"]["category"], serde_json::Value::Null);
        assert_eq!(results["filters"]["min_rating"], 4.9);

        assert!(gigfind_clear());
    }
}
