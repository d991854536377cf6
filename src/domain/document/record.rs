//! Persisted document record.

use serde::{Deserialize, Serialize};

use super::{ArtifactFileName, CompiledArtifact, DocumentRequest, RenderedSource};
use crate::domain::foundation::{DocumentId, Timestamp};

/// Everything produced by one successful pipeline run, not yet assigned an
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub metadata: DocumentRequest,
    pub content: RenderedSource,
    pub file_name: ArtifactFileName,
    pub pdf_content: Vec<u8>,
    pub checksum: String,
}

impl NewDocument {
    /// Assembles the record from the pipeline outputs.
    pub fn from_pipeline(
        metadata: DocumentRequest,
        content: RenderedSource,
        artifact: CompiledArtifact,
    ) -> Self {
        let (file_name, pdf_content, checksum) = artifact.into_parts();
        Self {
            metadata,
            content,
            file_name,
            pdf_content,
            checksum,
        }
    }
}

/// A stored document, read-only apart from wholesale replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub id: DocumentId,
    pub metadata: DocumentRequest,
    pub content: RenderedSource,
    pub file_name: ArtifactFileName,
    #[serde(skip)]
    pub pdf_content: Vec<u8>,
    pub checksum: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PersistedDocument {
    /// Materializes a record once the store has assigned `id`.
    pub fn from_new(id: DocumentId, new: NewDocument, at: Timestamp) -> Self {
        Self {
            id,
            metadata: new.metadata,
            content: new.content,
            file_name: new.file_name,
            pdf_content: new.pdf_content,
            checksum: new.checksum,
            created_at: at,
            updated_at: at,
        }
    }

    /// Replaces every field except `id` and `created_at`.
    pub fn replaced_with(self, new: NewDocument, at: Timestamp) -> Self {
        Self {
            updated_at: at,
            ..Self::from_new(self.id, new, self.created_at)
        }
    }

    /// True when the stored bytes still match the stored checksum.
    pub fn is_intact(&self) -> bool {
        CompiledArtifact::compute_checksum(&self.pdf_content) == self.checksum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_document(name: &str, bytes: &[u8]) -> NewDocument {
        NewDocument::from_pipeline(
            DocumentRequest::named(name),
            RenderedSource::new(format!("source for {}", name)),
            CompiledArtifact::new(ArtifactFileName::from_project_name(name), bytes.to_vec()),
        )
    }

    #[test]
    fn from_pipeline_carries_artifact_parts() {
        let new = new_document("Alpha One", b"pdf");

        assert_eq!(new.file_name.as_str(), "Alpha_One.pdf");
        assert_eq!(new.pdf_content, b"pdf");
        assert_eq!(new.checksum, CompiledArtifact::compute_checksum(b"pdf"));
    }

    #[test]
    fn replaced_with_keeps_identity_and_creation_time() {
        let id = DocumentId::from_raw(3).unwrap();
        let created = Timestamp::now();
        let original = PersistedDocument::from_new(id, new_document("Old", b"v1"), created);

        let later = Timestamp::now();
        let replaced = original.replaced_with(new_document("New", b"v2"), later);

        assert_eq!(replaced.id, id);
        assert_eq!(replaced.created_at, created);
        assert_eq!(replaced.updated_at, later);
        assert_eq!(replaced.file_name.as_str(), "New.pdf");
        assert_eq!(replaced.pdf_content, b"v2");
    }

    #[test]
    fn is_intact_detects_tampering() {
        let id = DocumentId::from_raw(1).unwrap();
        let mut doc = PersistedDocument::from_new(id, new_document("A", b"ok"), Timestamp::now());
        assert!(doc.is_intact());

        doc.pdf_content = b"tampered".to_vec();
        assert!(!doc.is_intact());
    }
}
