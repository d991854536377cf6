//! Request-scoped compilation workspaces.
//!
//! Each compilation gets its own directory under the base output directory:
//!
//! ```text
//! {base_dir}/
//! ├── Alpha_One.pdf                      (durable artifacts)
//! ├── temp_1718000000000_5f0c…/          (one per in-flight request)
//! │   ├── document.tex
//! │   └── document.pdf
//! └── temp_1718000000042_91ab…/
//! ```
//!
//! A workspace is removed exactly once: by [`Workspace::release`] on the
//! normal path, or by its `Drop` impl if the owning future is cancelled or
//! panics before release. `Drop` cannot await, so that path removes the
//! directory with blocking I/O on whichever thread drops it. A workspace holds
//! a handful of small files, so the stall is brief, and removal is complete
//! by the time the cancelled future is gone.
//!
//! Directories orphaned by a killed process are cleared at startup by
//! [`WorkspaceManager::remove_stale_workspaces`].

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::domain::foundation::Timestamp;
use crate::ports::StorageError;

/// Prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "temp_";

/// Provisions workspaces under a base directory.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    base_dir: PathBuf,
}

impl WorkspaceManager {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates the base directory if needed, then a fresh workspace in it.
    ///
    /// The directory name combines the creation time in milliseconds with a
    /// random UUID, so concurrent requests never share a workspace.
    pub async fn acquire(&self) -> Result<Workspace, StorageError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| StorageError::from_io(e, "create output directory", &self.base_dir))?;

        let name = format!(
            "{}{}_{}",
            WORKSPACE_PREFIX,
            Timestamp::now().as_unix_millis(),
            Uuid::new_v4().simple()
        );
        let path = self.base_dir.join(name);

        fs::create_dir(&path)
            .await
            .map_err(|e| StorageError::from_io(e, "create workspace", &path))?;

        tracing::debug!(workspace = %path.display(), "Workspace created");
        Ok(Workspace {
            path,
            released: false,
        })
    }

    /// Deletes every `temp_*` directory under the base directory. Only safe
    /// before requests are being served.
    pub async fn remove_stale_workspaces(&self) -> Result<usize, StorageError> {
        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(StorageError::from_io(e, "scan output directory", &self.base_dir))
            }
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::from_io(e, "scan output directory", &self.base_dir))?
        {
            let is_workspace = entry.file_name().to_string_lossy().starts_with(WORKSPACE_PREFIX)
                && entry.file_type().await.is_ok_and(|t| t.is_dir());
            if !is_workspace {
                continue;
            }
            match fs::remove_dir_all(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!(
                    workspace = %entry.path().display(),
                    error = %e,
                    "Failed to remove stale workspace"
                ),
            }
        }

        if removed > 0 {
            tracing::info!(removed, "Removed stale workspaces");
        }
        Ok(removed)
    }

    /// Runs `body` inside a fresh workspace and removes it afterwards.
    ///
    /// Removal happens whether `body` succeeds or fails, and its own failure
    /// is logged rather than returned, so the body's result always wins.
    pub async fn with_workspace<F, Fut, T, E>(&self, body: F) -> Result<T, E>
    where
        F: FnOnce(PathBuf) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<StorageError>,
    {
        let workspace = self.acquire().await?;
        let result = body(workspace.path().to_path_buf()).await;
        workspace.release().await;
        result
    }
}

/// A directory scoped to one compilation.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    released: bool,
}

impl Workspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recursively deletes the workspace. Failures are logged only.
    pub async fn release(mut self) {
        self.released = true;
        match fs::remove_dir_all(&self.path).await {
            Ok(()) => tracing::debug!(workspace = %self.path.display(), "Workspace removed"),
            Err(e) => tracing::warn!(
                workspace = %self.path.display(),
                error = %e,
                "Failed to remove workspace"
            ),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => tracing::debug!(
                workspace = %self.path.display(),
                "Workspace removed on drop"
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                workspace = %self.path.display(),
                error = %e,
                "Failed to remove workspace on drop"
            ),
        }
    }
}
