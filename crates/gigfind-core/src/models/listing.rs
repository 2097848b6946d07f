use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    #[default]
    Gig,
    Freelancer,
    Category,
}

/// One listing in the catalog. Records are validated when the catalog is
/// built and never change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchableRecord {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(alias = "freelancer")]
    pub freelancer_name: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub price: f64,
    pub rating: f64,
    #[serde(default, alias = "type")]
    pub kind: ListingKind,
}
