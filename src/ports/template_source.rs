//! Template Source Port - Loads the document template.

use async_trait::async_trait;
use thiserror::Error;

/// Port for loading the template text that documents are rendered from.
///
/// Called once per create/replace request, before any workspace is
/// provisioned, so edits to the template take effect without a restart.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Loads the full template text.
    ///
    /// # Errors
    ///
    /// Returns `TemplateReadError` if the template is missing or unreadable.
    async fn load(&self) -> Result<String, TemplateReadError>;
}

/// Errors loading the template. Always fatal for the request.
#[derive(Debug, Clone, Error)]
pub enum TemplateReadError {
    /// Template file does not exist.
    #[error("Template not found: {path}")]
    NotFound { path: String },

    /// Template exists but could not be read (permissions, encoding, I/O).
    #[error("Failed to read template {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

impl TemplateReadError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
