use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogResult, RecordStore};
use crate::models::{CoreError, CoreErrorKind, SearchableRecord};

/// On-disk catalog layout. Only `records` is required.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub records: Vec<SearchableRecord>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub popular_searches: Vec<String>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(CoreError),
}

impl From<CatalogError> for CoreError {
    fn from(error: CatalogError) -> Self {
        let kind = match error {
            CatalogError::Invalid(inner) => return inner,
            CatalogError::Io { .. } => CoreErrorKind::StorageFailure,
            CatalogError::Parse(_) => CoreErrorKind::ParseFailure,
        };
        CoreError::new(kind, error.to_string())
    }
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        let store = RecordStore::from_records(file.records).map_err(CatalogError::Invalid)?;
        Ok(Catalog {
            store,
            categories: file.categories,
            locations: file.locations,
            popular_searches: file.popular_searches,
        })
    }
}

pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    Catalog::try_from(file)
}

pub fn load_catalog(path: impl AsRef<Path>) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    let catalog = std::fs::read_to_string(path)
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|raw| parse_catalog(&raw))
        .inspect_err(|error| {
            tracing::warn!(path = %path.display(), error = %error, "rejected catalog file");
        })?;

    tracing::debug!(
        path = %path.display(),
        records = catalog.store.len(),
        categories = catalog.categories.len(),
        "loaded catalog"
    );
    Ok(catalog)
}
