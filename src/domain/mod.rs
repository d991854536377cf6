//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps, errors)
//! - `document` - Project metadata, rendered source, compiled artifacts and
//!   the persisted record

pub mod document;
pub mod foundation;
