//! Artifact Store Port - Durable storage of compiled artifacts.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::document::{CompiledArtifact, DocumentRequest};

/// Port for moving a compiled artifact out of its workspace.
///
/// # Contract
///
/// Implementations must:
/// - Derive the stored filename from the request's project name only
/// - Read the artifact fully into memory
/// - Copy it to durable storage, overwriting any file of the same name
/// - Never retry on failure
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Stores the artifact at `artifact_path` and returns its bytes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the artifact cannot be read or copied.
    async fn store(
        &self,
        artifact_path: &Path,
        request: &DocumentRequest,
    ) -> Result<CompiledArtifact, StorageError>;
}

/// Errors during filesystem operations on workspaces and artifacts.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// File was not found.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Permission denied accessing the file or directory.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Classifies an I/O error raised while `action` was applied to `path`.
    pub fn from_io(err: std::io::Error, action: &str, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(path.display().to_string())
            }
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), err)),
        }
    }
}
