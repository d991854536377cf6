//! Document command and query handlers.
//!
//! Handlers for generating, regenerating and retrieving documents.

mod pipeline;

// Command handlers
mod create_document;
mod replace_document;

// Query handlers
mod get_document;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_document::{
    CreateDocumentCommand, CreateDocumentError, CreateDocumentHandler, CreateDocumentResult,
};
pub use get_document::{GetDocumentError, GetDocumentHandler, GetDocumentQuery, GetDocumentResult};
pub use pipeline::{DocumentPipeline, PipelineError};
pub use replace_document::{
    ReplaceDocumentCommand, ReplaceDocumentError, ReplaceDocumentHandler, ReplaceDocumentResult,
};
