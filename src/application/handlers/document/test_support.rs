//! Fakes shared by the document handler tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::DocumentPipeline;
use crate::adapters::document::{
    LatexTemplateRenderer, LocalArtifactStore, WorkspaceManager, OUTPUT_FILE_NAME,
    WORKSPACE_PREFIX,
};
use crate::domain::document::RenderedSource;
use crate::ports::{CompilationError, DocumentCompiler, TemplateReadError, TemplateSource};

pub struct FakeTemplateSource {
    template: Option<String>,
}

impl FakeTemplateSource {
    pub fn ok(template: &str) -> Self {
        Self {
            template: Some(template.to_string()),
        }
    }

    pub fn missing() -> Self {
        Self { template: None }
    }
}

#[async_trait]
impl TemplateSource for FakeTemplateSource {
    async fn load(&self) -> Result<String, TemplateReadError> {
        self.template
            .clone()
            .ok_or_else(|| TemplateReadError::not_found("template.tex"))
    }
}

enum Outcome {
    Produce(Vec<u8>),
    Fail,
    SucceedWithoutOutput,
}

/// Writes a fixed PDF into the workspace instead of running `pdflatex`.
pub struct FakeCompiler {
    outcome: Outcome,
    workspaces: Mutex<Vec<PathBuf>>,
}

impl FakeCompiler {
    pub fn producing(bytes: &[u8]) -> Self {
        Self::with(Outcome::Produce(bytes.to_vec()))
    }

    pub fn failing() -> Self {
        Self::with(Outcome::Fail)
    }

    pub fn claiming_success_without_output() -> Self {
        Self::with(Outcome::SucceedWithoutOutput)
    }

    fn with(outcome: Outcome) -> Self {
        Self {
            outcome,
            workspaces: Mutex::new(Vec::new()),
        }
    }

    pub fn last_workspace(&self) -> Option<PathBuf> {
        self.workspaces.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DocumentCompiler for FakeCompiler {
    async fn compile(
        &self,
        source: &RenderedSource,
        workspace: &Path,
    ) -> Result<PathBuf, CompilationError> {
        self.workspaces.lock().unwrap().push(workspace.to_path_buf());
        std::fs::write(workspace.join("document.tex"), source.as_str()).unwrap();

        let output = workspace.join(OUTPUT_FILE_NAME);
        match &self.outcome {
            Outcome::Produce(bytes) => {
                std::fs::write(&output, bytes).unwrap();
                Ok(output)
            }
            Outcome::Fail => Err(CompilationError::NonZeroExit {
                exit_code: Some(1),
                diagnostics: "! LaTeX Error: File `missing.sty' not found.".to_string(),
            }),
            Outcome::SucceedWithoutOutput => Ok(output),
        }
    }
}

pub fn pipeline_with(
    output_dir: &Path,
    template_source: Arc<dyn TemplateSource>,
    compiler: Arc<dyn DocumentCompiler>,
) -> DocumentPipeline {
    DocumentPipeline::new(
        template_source,
        Arc::new(LatexTemplateRenderer::new()),
        WorkspaceManager::new(output_dir),
        compiler,
        Arc::new(LocalArtifactStore::new(output_dir)),
    )
}

/// Number of workspace directories left under `dir`.
pub fn workspace_dirs(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.file_name().to_string_lossy().starts_with(WORKSPACE_PREFIX))
                .count()
        })
        .unwrap_or(0)
}
