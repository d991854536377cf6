//! In-Memory Document Repository Adapter
//!
//! Stores generated documents in memory.
//! Used when no database URL is configured, and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::{NewDocument, PersistedDocument};
use crate::domain::foundation::{DocumentId, Timestamp};
use crate::ports::{DocumentRepository, PersistenceError};

/// In-memory storage for generated documents
#[derive(Debug, Clone)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<DocumentId, PersistedDocument>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryDocumentRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Get the number of stored documents
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Clear all stored documents (useful for tests)
    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }

    fn allocate_id(&self) -> Result<DocumentId, PersistenceError> {
        let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
        DocumentId::from_raw(raw).map_err(|e| PersistenceError::database(e.to_string()))
    }
}

impl Default for InMemoryDocumentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: NewDocument) -> Result<PersistedDocument, PersistenceError> {
        let id = self.allocate_id()?;
        let persisted = PersistedDocument::from_new(id, document, Timestamp::now());

        let mut documents = self.documents.write().await;
        documents.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn replace(
        &self,
        id: DocumentId,
        document: NewDocument,
    ) -> Result<Option<PersistedDocument>, PersistenceError> {
        let mut documents = self.documents.write().await;
        let Some(existing) = documents.remove(&id) else {
            return Ok(None);
        };
        let replaced = existing.replaced_with(document, Timestamp::now());
        documents.insert(id, replaced.clone());
        Ok(Some(replaced))
    }

    async fn find_by_id(
        &self,
        id: DocumentId,
    ) -> Result<Option<PersistedDocument>, PersistenceError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id).cloned())
    }
}
