//! DocumentPipeline - Renders, compiles and stores one document.
//!
//! The pipeline is shared by the create and replace handlers. It owns the
//! per-request ordering:
//!
//! ```text
//! validate → load template → render → acquire workspace
//!          → compile (N passes) → store artifact → release workspace
//! ```
//!
//! Nothing is persisted here; the caller saves the returned `NewDocument`
//! only after every step succeeded.

use std::sync::Arc;
use thiserror::Error;

use crate::adapters::document::WorkspaceManager;
use crate::domain::document::{DocumentRequest, NewDocument};
use crate::domain::foundation::ValidationError;
use crate::ports::{
    ArtifactStore, CompilationError, DocumentCompiler, StorageError, TemplateReadError,
    TemplateRenderer, TemplateSource,
};

/// Errors from a pipeline run.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// The request itself is unusable.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    #[error(transparent)]
    TemplateRead(#[from] TemplateReadError),

    #[error(transparent)]
    Compilation(#[from] CompilationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Document generation pipeline.
///
/// # Dependencies
///
/// - `TemplateSource`: Load the template text
/// - `TemplateRenderer`: Substitute request fields
/// - `WorkspaceManager`: Scoped compilation directories
/// - `DocumentCompiler`: Run the external compiler
/// - `ArtifactStore`: Copy the PDF to durable storage
pub struct DocumentPipeline {
    template_source: Arc<dyn TemplateSource>,
    renderer: Arc<dyn TemplateRenderer>,
    workspaces: WorkspaceManager,
    compiler: Arc<dyn DocumentCompiler>,
    artifact_store: Arc<dyn ArtifactStore>,
}

impl DocumentPipeline {
    pub fn new(
        template_source: Arc<dyn TemplateSource>,
        renderer: Arc<dyn TemplateRenderer>,
        workspaces: WorkspaceManager,
        compiler: Arc<dyn DocumentCompiler>,
        artifact_store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            template_source,
            renderer,
            workspaces,
            compiler,
            artifact_store,
        }
    }

    /// Runs the full pipeline for `request`.
    ///
    /// The workspace is removed before this returns, on success and on
    /// failure. If the returned future is dropped mid-compilation, the
    /// compiler process is killed and the workspace removed on drop.
    pub async fn generate(&self, request: &DocumentRequest) -> Result<NewDocument, PipelineError> {
        request.validate()?;

        let template = self.template_source.load().await?;
        let source = self.renderer.render(&template, request);

        let compiler = self.compiler.as_ref();
        let store = self.artifact_store.as_ref();
        let rendered = &source;

        let artifact = self
            .workspaces
            .with_workspace(|workspace| async move {
                let pdf_path = compiler.compile(rendered, &workspace).await?;
                let artifact = store.store(&pdf_path, request).await?;
                Ok::<_, PipelineError>(artifact)
            })
            .await
            .map_err(|e| {
                tracing::warn!(
                    project = request.project_name(),
                    error = %e,
                    "Document generation failed"
                );
                e
            })?;

        tracing::info!(
            project = request.project_name(),
            file = %artifact.file_name(),
            size_bytes = artifact.bytes().len(),
            "Document generated"
        );

        Ok(NewDocument::from_pipeline(request.clone(), source, artifact))
    }
}
