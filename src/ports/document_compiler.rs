//! Document Compiler Port - External compiler orchestration interface.
//!
//! The domain depends on this trait, while adapters (like `LatexCompiler`)
//! drive an actual compiler process.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::domain::document::RenderedSource;

/// Port for compiling rendered source into a binary artifact.
///
/// # Contract
///
/// Implementations must:
/// - Write the source into `workspace` and compile it there
/// - Bound every compiler invocation by a timeout
/// - Treat only the final invocation's exit status as authoritative
/// - Confirm the output file exists before returning its path
/// - Leave `workspace` in place; its teardown belongs to the caller
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    /// Compiles `source` inside `workspace`, returning the artifact path.
    ///
    /// # Errors
    ///
    /// Returns `CompilationError` on spawn failure, timeout, non-zero final
    /// exit status, or a missing output file.
    async fn compile(
        &self,
        source: &RenderedSource,
        workspace: &Path,
    ) -> Result<PathBuf, CompilationError>;
}

/// Errors that can occur while compiling a document.
///
/// Variants raised after the compiler ran carry its captured output.
#[derive(Debug, Clone, Error)]
pub enum CompilationError {
    /// Source file could not be written into the workspace.
    #[error("Failed to write source file {path}: {reason}")]
    SourceWriteFailed { path: String, reason: String },

    /// Compiler process could not be started.
    #[error("Failed to start compiler '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    /// An invocation exceeded its time budget and was killed.
    #[error("Compiler pass {pass} timed out after {timeout:?}")]
    Timeout {
        pass: u32,
        timeout: Duration,
        diagnostics: String,
    },

    /// The final invocation exited unsuccessfully.
    #[error("Compiler failed on final pass with exit code {}", display_code(.exit_code))]
    NonZeroExit {
        exit_code: Option<i32>,
        diagnostics: String,
    },

    /// The compiler reported success but the artifact is absent.
    #[error("Compiler produced no output file at {path}")]
    MissingOutput { path: String, diagnostics: String },
}

fn display_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none (terminated by signal)".to_string())
}

impl CompilationError {
    /// Captured compiler output, if the compiler got to run.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            CompilationError::Timeout { diagnostics, .. }
            | CompilationError::NonZeroExit { diagnostics, .. }
            | CompilationError::MissingOutput { diagnostics, .. } => Some(diagnostics),
            CompilationError::SourceWriteFailed { .. } | CompilationError::SpawnFailed { .. } => {
                None
            }
        }
    }

    /// True if the failure was the time budget running out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CompilationError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_zero_exit_displays_code() {
        let err = CompilationError::NonZeroExit {
            exit_code: Some(1),
            diagnostics: "! Undefined control sequence.".to_string(),
        };
        assert!(err.to_string().contains("exit code 1"));
        assert_eq!(err.diagnostics(), Some("! Undefined control sequence."));
    }

    #[test]
    fn non_zero_exit_without_code_mentions_signal() {
        let err = CompilationError::NonZeroExit {
            exit_code: None,
            diagnostics: String::new(),
        };
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn timeout_is_flagged() {
        let err = CompilationError::Timeout {
            pass: 2,
            timeout: Duration::from_secs(30),
            diagnostics: String::new(),
        };
        assert!(err.is_timeout());
        assert!(err.to_string().contains("pass 2"));
    }

    #[test]
    fn spawn_failure_has_no_diagnostics() {
        let err = CompilationError::SpawnFailed {
            program: "pdflatex".to_string(),
            reason: "not found".to_string(),
        };
        assert!(err.diagnostics().is_none());
        assert!(!err.is_timeout());
    }

    #[test]
    fn document_compiler_is_object_safe() {
        fn check<T: DocumentCompiler + ?Sized>() {}
        check::<dyn DocumentCompiler>();
    }
}
