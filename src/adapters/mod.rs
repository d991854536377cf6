//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `document` - Template loading, LaTeX compilation, artifact storage
//! - `http` - Axum REST endpoints
//! - `postgres` - PostgreSQL document repository
//! - `storage` - In-memory document repository

pub mod document;
pub mod http;
pub mod postgres;
pub mod storage;

pub use document::{
    FileTemplateSource, LatexCompiler, LatexTemplateRenderer, LocalArtifactStore,
    WorkspaceManager,
};
pub use http::{document_router, DocumentAppState};
pub use postgres::PostgresDocumentRepository;
pub use storage::InMemoryDocumentRepository;
