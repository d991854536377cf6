//! Storage Adapters
//!
//! In-process implementations of the DocumentRepository port.
//!
//! ## Available Adapters
//!
//! - **InMemoryDocumentRepository** - Stores documents in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryDocumentRepository;
//!
//! let repository = Arc::new(InMemoryDocumentRepository::new());
//! ```

mod in_memory_document_repository;

pub use in_memory_document_repository::InMemoryDocumentRepository;
