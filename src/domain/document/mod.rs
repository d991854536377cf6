//! Document module - Project charter generation vocabulary.
//!
//! A [`DocumentRequest`] carries the project metadata supplied by a caller.
//! Rendering it into a template yields a [`RenderedSource`]; compiling that
//! source yields a [`CompiledArtifact`]; the pair is persisted as a
//! [`PersistedDocument`].

mod artifact;
mod placeholder;
mod record;
mod request;
mod roles;

pub use artifact::{ArtifactFileName, CompiledArtifact, RenderedSource, ARTIFACT_EXTENSION};
pub use placeholder::Placeholder;
pub use record::{NewDocument, PersistedDocument};
pub use request::DocumentRequest;
pub use roles::{RoleRow, RolesTable, COLUMN_DELIMITER, ROW_DELIMITER};
