//! Local Artifact Store - Copies compiled PDFs to the output directory.
//!
//! Artifacts are written with a temp-file-then-rename so a concurrent request
//! for the same project name can never leave a half-written file behind. The
//! last rename wins. A temp file whose request is cancelled before the rename
//! is removed when the write is dropped; [`LocalArtifactStore::remove_stale_temp_files`]
//! clears any left by a crashed process.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::document::{ArtifactFileName, CompiledArtifact, DocumentRequest};
use crate::ports::{ArtifactStore, StorageError};

/// Durable artifact storage on the local filesystem.
///
/// # Directory Structure
///
/// ```text
/// {output_dir}/
/// ├── Alpha_One.pdf
/// ├── Beta.pdf
/// └── temp_1700000000000_<uuid>/   (workspace, removed after compilation)
/// ```
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    output_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path an artifact with `file_name` is stored under.
    pub fn artifact_path(&self, file_name: &ArtifactFileName) -> PathBuf {
        self.output_dir.join(file_name.as_str())
    }

    /// Deletes `*.tmp` files left in the output directory by an earlier
    /// process. Only safe before requests are being served.
    pub async fn remove_stale_temp_files(&self) -> Result<usize, StorageError> {
        let mut entries = match fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(StorageError::from_io(e, "scan output directory", &self.output_dir))
            }
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::from_io(e, "scan output directory", &self.output_dir))?
        {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == TEMP_EXTENSION) {
                continue;
            }
            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "Failed to remove stale temp file"
                ),
            }
        }

        if removed > 0 {
            tracing::info!(
                removed,
                dir = %self.output_dir.display(),
                "Removed stale artifact temp files"
            );
        }
        Ok(removed)
    }

    fn check_file_name(file_name: &ArtifactFileName) -> Result<(), StorageError> {
        let name = file_name.as_str();
        if name.contains('/') || name.contains('\\') || name.starts_with("..") {
            return Err(StorageError::io(format!(
                "Artifact name {:?} would escape the output directory",
                name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(
        &self,
        artifact_path: &Path,
        request: &DocumentRequest,
    ) -> Result<CompiledArtifact, StorageError> {
        let file_name = ArtifactFileName::from_project_name(request.project_name());
        Self::check_file_name(&file_name)?;

        let bytes = fs::read(artifact_path)
            .await
            .map_err(|e| StorageError::from_io(e, "read artifact", artifact_path))?;

        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| StorageError::from_io(e, "create output directory", &self.output_dir))?;

        let destination = self.artifact_path(&file_name);
        let pending = PendingWrite::new(self.output_dir.join(format!(
            "{}.{}.{}",
            file_name,
            uuid::Uuid::new_v4().simple(),
            TEMP_EXTENSION
        )));

        fs::write(pending.path(), &bytes)
            .await
            .map_err(|e| StorageError::from_io(e, "write artifact", pending.path()))?;

        pending
            .commit(&destination)
            .await
            .map_err(|e| StorageError::from_io(e, "move artifact to", &destination))?;

        tracing::info!(
            file = %destination.display(),
            size_bytes = bytes.len(),
            "Stored compiled artifact"
        );

        Ok(CompiledArtifact::new(file_name, bytes))
    }
}

const TEMP_EXTENSION: &str = "tmp";

/// A temp file that is deleted on drop unless renamed into place.
#[derive(Debug)]
struct PendingWrite {
    path: PathBuf,
    committed: bool,
}

impl PendingWrite {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            committed: false,
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    async fn commit(mut self, destination: &Path) -> std::io::Result<()> {
        fs::rename(&self.path, destination).await?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(file = %self.path.display(), "Discarded unfinished artifact write")
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                file = %self.path.display(),
                error = %e,
                "Failed to discard unfinished artifact write"
            ),
        }
    }
}
