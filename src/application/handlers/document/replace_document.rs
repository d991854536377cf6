//! ReplaceDocumentHandler - Command handler for regenerating a document.
//!
//! Regenerates the PDF from new metadata and replaces the stored record
//! wholesale. The identifier and creation time are kept.

use std::sync::Arc;
use thiserror::Error;

use super::pipeline::{DocumentPipeline, PipelineError};
use crate::domain::document::{DocumentRequest, PersistedDocument};
use crate::domain::foundation::DocumentId;
use crate::ports::{DocumentRepository, NotFoundError, PersistenceError};

/// Command to replace an existing document.
#[derive(Debug, Clone)]
pub struct ReplaceDocumentCommand {
    pub id: DocumentId,
    pub request: DocumentRequest,
}

/// Result of successful replacement.
pub type ReplaceDocumentResult = PersistedDocument;

/// Error type for document replacement.
#[derive(Debug, Clone, Error)]
pub enum ReplaceDocumentError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Handler for replacing documents.
pub struct ReplaceDocumentHandler {
    pipeline: Arc<DocumentPipeline>,
    repository: Arc<dyn DocumentRepository>,
}

impl ReplaceDocumentHandler {
    pub fn new(pipeline: Arc<DocumentPipeline>, repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            pipeline,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReplaceDocumentCommand,
    ) -> Result<ReplaceDocumentResult, ReplaceDocumentError> {
        // Fail fast before spending a compilation on an unknown id.
        if self.repository.find_by_id(cmd.id).await?.is_none() {
            return Err(NotFoundError(cmd.id).into());
        }

        let document = self.pipeline.generate(&cmd.request).await?;

        // The record may have disappeared while compiling.
        let replaced = self
            .repository
            .replace(cmd.id, document)
            .await?
            .ok_or(NotFoundError(cmd.id))?;

        tracing::info!(
            document_id = %replaced.id,
            file = %replaced.file_name,
            "Document replaced"
        );
        Ok(replaced)
    }
}
