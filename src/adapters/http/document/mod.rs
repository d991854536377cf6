//! HTTP adapter for the document module.
//!
//! This module exposes document generation and retrieval via REST endpoints.
//!
//! # Endpoints
//!
//! - `POST /api/documents/latex` - Generate a PDF from project metadata
//! - `GET /api/documents/{id}` - Download a stored PDF
//! - `PUT /api/documents/{id}` - Regenerate a stored document
//! - `GET /api/documents/{id}/metadata` - Stored metadata
//! - `GET /api/documents/{id}/source` - Rendered LaTeX source

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::DocumentAppState;
pub use routes::document_router;
