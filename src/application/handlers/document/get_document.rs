//! GetDocumentHandler - Query handler for retrieving a stored document.

use std::sync::Arc;

use crate::domain::document::PersistedDocument;
use crate::domain::foundation::DocumentId;
use crate::ports::{DocumentRepository, NotFoundError, PersistenceError};

/// Query to get a document by ID.
#[derive(Debug, Clone, Copy)]
pub struct GetDocumentQuery {
    pub id: DocumentId,
}

/// Result of successful document query.
pub type GetDocumentResult = PersistedDocument;

/// Error type for getting a document.
#[derive(Debug, Clone)]
pub enum GetDocumentError {
    /// Document not found.
    NotFound(NotFoundError),
    /// Repository failure.
    Persistence(PersistenceError),
}

impl std::fmt::Display for GetDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetDocumentError::NotFound(err) => write!(f, "{}", err),
            GetDocumentError::Persistence(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetDocumentError {}

impl From<NotFoundError> for GetDocumentError {
    fn from(err: NotFoundError) -> Self {
        GetDocumentError::NotFound(err)
    }
}

impl From<PersistenceError> for GetDocumentError {
    fn from(err: PersistenceError) -> Self {
        GetDocumentError::Persistence(err)
    }
}

/// Handler for retrieving documents.
///
/// Returns the stored record with its PDF bytes exactly as saved.
pub struct GetDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
}

impl GetDocumentHandler {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetDocumentQuery,
    ) -> Result<GetDocumentResult, GetDocumentError> {
        let document = self
            .repository
            .find_by_id(query.id)
            .await?
            .ok_or(NotFoundError(query.id))?;

        if !document.is_intact() {
            tracing::warn!(
                document_id = %document.id,
                "Stored PDF does not match its checksum"
            );
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDocumentRepository;
    use crate::domain::document::{
        ArtifactFileName, CompiledArtifact, DocumentRequest, NewDocument, RenderedSource,
    };

    async fn repository_with(name: &str, bytes: &[u8]) -> (InMemoryDocumentRepository, DocumentId) {
        let repository = InMemoryDocumentRepository::new();
        let saved = repository
            .save(NewDocument::from_pipeline(
                DocumentRequest::named(name),
                RenderedSource::new("source"),
                CompiledArtifact::new(ArtifactFileName::from_project_name(name), bytes.to_vec()),
            ))
            .await
            .unwrap();
        (repository, saved.id)
    }

    #[tokio::test]
    async fn handle_returns_stored_bytes() {
        let (repository, id) = repository_with("Alpha One", b"%PDF-1.4 stored").await;
        let handler = GetDocumentHandler::new(Arc::new(repository));

        let document = handler.handle(GetDocumentQuery { id }).await.unwrap();

        assert_eq!(document.pdf_content, b"%PDF-1.4 stored");
        assert_eq!(document.file_name.as_str(), "Alpha_One.pdf");
    }

    #[tokio::test]
    async fn handle_returns_not_found_for_unknown_id() {
        let (repository, _) = repository_with("A", b"x").await;
        let handler = GetDocumentHandler::new(Arc::new(repository));
        let unknown = DocumentId::from_raw(404).unwrap();

        let result = handler.handle(GetDocumentQuery { id: unknown }).await;

        match result {
            Err(GetDocumentError::NotFound(err)) => assert_eq!(err.id(), unknown),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn error_display() {
        let err = GetDocumentError::from(NotFoundError(DocumentId::from_raw(5).unwrap()));
        assert_eq!(err.to_string(), "Document not found: 5");
    }
}
