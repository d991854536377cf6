//! Document Repository Port - Persistence of generated documents.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::document::{NewDocument, PersistedDocument};
use crate::domain::foundation::DocumentId;

/// Port for persisting generated documents.
///
/// # Contract
///
/// Implementations must:
/// - Assign a fresh identifier on `save`
/// - Replace records wholesale; no partial updates
/// - Return `Ok(None)` rather than an error for unknown identifiers
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persists a new document and returns it with its assigned identifier.
    async fn save(&self, document: NewDocument) -> Result<PersistedDocument, PersistenceError>;

    /// Replaces an existing document. Returns `None` if `id` is unknown.
    async fn replace(
        &self,
        id: DocumentId,
        document: NewDocument,
    ) -> Result<Option<PersistedDocument>, PersistenceError>;

    /// Finds a document by identifier.
    async fn find_by_id(&self, id: DocumentId)
        -> Result<Option<PersistedDocument>, PersistenceError>;
}

/// Errors from the persistence collaborator.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// The backing store rejected or failed the operation.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored row could not be mapped back to a document.
    #[error("Corrupt document record {id}: {reason}")]
    CorruptRecord { id: i64, reason: String },
}

/// No document exists under the requested identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Document not found: {0}")]
pub struct NotFoundError(pub DocumentId);

impl NotFoundError {
    pub fn id(&self) -> DocumentId {
        self.0
    }
}

impl PersistenceError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}
