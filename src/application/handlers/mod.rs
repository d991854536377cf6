//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod document;

pub use document::{
    // Pipeline
    DocumentPipeline,
    PipelineError,
    // Commands
    CreateDocumentCommand,
    CreateDocumentError,
    CreateDocumentHandler,
    CreateDocumentResult,
    ReplaceDocumentCommand,
    ReplaceDocumentError,
    ReplaceDocumentHandler,
    ReplaceDocumentResult,
    // Queries
    GetDocumentError,
    GetDocumentHandler,
    GetDocumentQuery,
    GetDocumentResult,
};
