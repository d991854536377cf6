//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Pipeline Ports
//!
//! - `TemplateSource` - Loads the template text
//! - `TemplateRenderer` - Substitutes placeholders with request fields
//! - `DocumentCompiler` - Drives the external compiler inside a workspace
//! - `ArtifactStore` - Copies the compiled artifact to durable storage
//!
//! ## Persistence Ports
//!
//! - `DocumentRepository` - Saves, replaces and finds generated documents

mod artifact_store;
mod document_compiler;
mod document_repository;
mod template_renderer;
mod template_source;

pub use artifact_store::{ArtifactStore, StorageError};
pub use document_compiler::{CompilationError, DocumentCompiler};
pub use document_repository::{DocumentRepository, NotFoundError, PersistenceError};
pub use template_renderer::TemplateRenderer;
pub use template_source::{TemplateReadError, TemplateSource};
