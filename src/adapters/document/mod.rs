//! Document adapters - Implementations of the generation pipeline ports.
//!
//! This module provides adapters for the document-related ports:
//! - `FileTemplateSource` - Reads the LaTeX template from disk
//! - `LatexTemplateRenderer` - Substitutes request fields into the template
//! - `WorkspaceManager` - Scoped temporary directories for compilation
//! - `LatexCompiler` - Runs `pdflatex` as a child process
//! - `LocalArtifactStore` - Copies compiled PDFs to the output directory

mod file_template_source;
mod latex_compiler;
mod local_artifact_store;
mod template_renderer;
mod workspace;

pub use file_template_source::FileTemplateSource;
pub use latex_compiler::{
    DiagnosticBuffer, LatexCompiler, DEFAULT_MAX_DIAGNOSTIC_BYTES, DEFAULT_PASSES,
    DEFAULT_TIMEOUT, OUTPUT_FILE_NAME, SOURCE_FILE_NAME,
};
pub use local_artifact_store::LocalArtifactStore;
pub use template_renderer::{substitute, LatexTemplateRenderer};
pub use workspace::{Workspace, WorkspaceManager, WORKSPACE_PREFIX};
