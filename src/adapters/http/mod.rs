//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod document;

// Re-export key types for convenience
pub use document::document_router;
pub use document::DocumentAppState;
