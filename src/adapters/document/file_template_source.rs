//! Filesystem template source adapter.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{TemplateReadError, TemplateSource};

/// Reads the template from a configured path on every load.
#[derive(Debug, Clone)]
pub struct FileTemplateSource {
    path: PathBuf,
}

impl FileTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TemplateSource for FileTemplateSource {
    async fn load(&self) -> Result<String, TemplateReadError> {
        let path_text = self.path.display().to_string();

        let template = fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => TemplateReadError::not_found(&path_text),
                std::io::ErrorKind::InvalidData => {
                    TemplateReadError::unreadable(&path_text, "template is not valid UTF-8")
                }
                _ => TemplateReadError::unreadable(&path_text, e.to_string()),
            })?;

        tracing::debug!(path = %path_text, bytes = template.len(), "Loaded template");
        Ok(template)
    }
}
