//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresDocumentRepository` - Stores generated documents and their PDFs

mod document_repository;

pub use document_repository::PostgresDocumentRepository;
