//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of a persisted document.
///
/// Assigned by the persistence collaborator on first save, so there is no
/// `new()` constructor: callers only ever receive or parse one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(i64);

impl DocumentId {
    /// Wraps a raw identifier, rejecting zero and negative values.
    pub fn from_raw(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::out_of_range_i64("document_id", 1, i64::MAX, id));
        }
        Ok(Self(id))
    }

    /// Returns the inner integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors parsing a [`DocumentId`] from text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DocumentIdParseError {
    #[error("Document ID is not an integer: {0}")]
    NotAnInteger(#[from] ParseIntError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl FromStr for DocumentId {
    type Err = DocumentIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.trim().parse()?;
        Ok(Self::from_raw(raw)?)
    }
}
