pub mod builtin;
pub mod loader;

pub use loader::{CatalogError, CatalogFile, load_catalog, parse_catalog};

use std::collections::HashSet;

use crate::models::{
    ALL_CATEGORIES, ALL_LOCATIONS, CoreError, CoreErrorKind, RecordId, SearchableRecord,
};

pub type CatalogResult<T> = Result<T, CoreError>;

/// Read-only, ordered listing table. Construction is the only place record
/// invariants are checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<SearchableRecord>,
}

impl RecordStore {
    pub fn from_records(records: Vec<SearchableRecord>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            validate_record(record)?;
            if !seen.insert(&record.id) {
                return Err(CoreError::for_record(
                    &record.id,
                    CoreErrorKind::InvalidInput,
                    "duplicate record id",
                ));
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SearchableRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&SearchableRecord> {
        self.records.iter().find(|record| &record.id == id)
    }
}

fn validate_record(record: &SearchableRecord) -> CatalogResult<()> {
    if record.id.0.trim().is_empty() {
        return Err(CoreError::new(
            CoreErrorKind::InvalidInput,
            format!("record '{}' has an empty id", record.title),
        ));
    }

    if !record.price.is_finite() || record.price < 0.0 {
        return Err(CoreError::for_record(
            &record.id,
            CoreErrorKind::InvalidInput,
            format!("price must be a non-negative number, got {}", record.price),
        ));
    }

    if !record.rating.is_finite() || !(0.0..=5.0).contains(&record.rating) {
        return Err(CoreError::for_record(
            &record.id,
            CoreErrorKind::InvalidInput,
            format!("rating must be within [0, 5], got {}", record.rating),
        ));
    }

    Ok(())
}

/// Everything the search session reads: the record table plus the static
/// vocabularies offered by the filter controls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub store: RecordStore,
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub popular_searches: Vec<String>,
}

impl Catalog {
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Category selector entries, led by the "All Categories" sentinel.
    pub fn category_choices(&self) -> Vec<String> {
        std::iter::once(ALL_CATEGORIES.to_string())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    pub fn location_choices(&self) -> Vec<String> {
        std::iter::once(ALL_LOCATIONS.to_string())
            .chain(self.locations.iter().cloned())
            .collect()
    }
}
