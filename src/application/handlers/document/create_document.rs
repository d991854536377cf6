//! CreateDocumentHandler - Command handler for generating a new document.
//!
//! Runs the pipeline and saves the result. The record is saved only after the
//! artifact has been compiled and stored, so a failed run leaves nothing in
//! the repository.

use std::sync::Arc;
use thiserror::Error;

use super::pipeline::{DocumentPipeline, PipelineError};
use crate::domain::document::{DocumentRequest, PersistedDocument};
use crate::ports::{DocumentRepository, PersistenceError};

/// Command to generate and persist a document.
#[derive(Debug, Clone)]
pub struct CreateDocumentCommand {
    pub request: DocumentRequest,
}

/// Result of successful document creation.
pub type CreateDocumentResult = PersistedDocument;

/// Error type for document creation.
#[derive(Debug, Clone, Error)]
pub enum CreateDocumentError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Handler for creating documents.
///
/// # Usage
///
/// ```rust,ignore
/// let handler = CreateDocumentHandler::new(pipeline, repository);
/// let document = handler.handle(CreateDocumentCommand { request }).await?;
/// println!("Stored as {}", document.file_name);
/// ```
pub struct CreateDocumentHandler {
    pipeline: Arc<DocumentPipeline>,
    repository: Arc<dyn DocumentRepository>,
}

impl CreateDocumentHandler {
    pub fn new(pipeline: Arc<DocumentPipeline>, repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            pipeline,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateDocumentCommand,
    ) -> Result<CreateDocumentResult, CreateDocumentError> {
        let document = self.pipeline.generate(&cmd.request).await?;
        let saved = self.repository.save(document).await?;

        tracing::info!(
            document_id = %saved.id,
            file = %saved.file_name,
            "Document created"
        );
        Ok(saved)
    }
}
