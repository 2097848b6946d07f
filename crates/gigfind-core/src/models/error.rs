use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::models::RecordId;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CoreErrorKind {
    InvalidInput,
    ParseFailure,
    StorageFailure,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoreError {
    pub record: Option<RecordId>,
    pub kind: CoreErrorKind,
    pub message: String,
}

impl CoreError {
    pub fn new(kind: CoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            record: None,
            kind,
            message: message.into(),
        }
    }

    pub fn for_record(record: &RecordId, kind: CoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            record: Some(record.clone()),
            kind,
            message: message.into(),
        }
    }
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.record {
            Some(record) => write!(f, "{:?} (record '{}'): {}", self.kind, record, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for CoreError {}
