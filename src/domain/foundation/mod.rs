//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and validation errors used across the
//! document domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{DocumentId, DocumentIdParseError};
pub use timestamp::Timestamp;
