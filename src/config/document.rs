//! Document generation configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

const MAX_COMPILE_TIMEOUT_SECS: u64 = 600;
const MAX_COMPILE_PASSES: u32 = 5;
const MIN_DIAGNOSTIC_BYTES: usize = 1024;

/// Document pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    /// Directory receiving stored PDFs and per-request workspaces
    pub output_path: PathBuf,

    /// LaTeX template file with `{{placeholder}}` tokens
    pub template_path: PathBuf,

    /// Compiler executable (name on PATH or absolute path)
    #[serde(default = "default_compiler_program")]
    pub compiler_program: String,

    /// Time budget per compiler pass in seconds
    #[serde(default = "default_compile_timeout")]
    pub compile_timeout_secs: u64,

    /// Compiler passes per document
    #[serde(default = "default_compile_passes")]
    pub compile_passes: u32,

    /// Bytes of compiler output kept for error reports
    #[serde(default = "default_max_diagnostic_bytes")]
    pub max_diagnostic_bytes: usize,
}

impl DocumentConfig {
    /// Creates a configuration with defaults for everything but the paths.
    pub fn new(output_path: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            template_path: template_path.into(),
            compiler_program: default_compiler_program(),
            compile_timeout_secs: default_compile_timeout(),
            compile_passes: default_compile_passes(),
            max_diagnostic_bytes: default_max_diagnostic_bytes(),
        }
    }

    /// Get compile timeout as Duration
    pub fn compile_timeout(&self) -> Duration {
        Duration::from_secs(self.compile_timeout_secs)
    }

    /// Longest a compilation may run: every pass using its full timeout.
    pub fn worst_case_compile_secs(&self) -> u64 {
        self.compile_timeout_secs
            .saturating_mul(u64::from(self.compile_passes))
    }

    /// Validate document configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("DOCUMENT__OUTPUT_PATH"));
        }
        if self.template_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("DOCUMENT__TEMPLATE_PATH"));
        }
        if self.compiler_program.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DOCUMENT__COMPILER_PROGRAM"));
        }
        if !(1..=MAX_COMPILE_TIMEOUT_SECS).contains(&self.compile_timeout_secs) {
            return Err(ValidationError::InvalidCompileTimeout(MAX_COMPILE_TIMEOUT_SECS));
        }
        if !(1..=MAX_COMPILE_PASSES).contains(&self.compile_passes) {
            return Err(ValidationError::InvalidCompilePasses(MAX_COMPILE_PASSES));
        }
        if self.max_diagnostic_bytes < MIN_DIAGNOSTIC_BYTES {
            return Err(ValidationError::InvalidDiagnosticLimit(MIN_DIAGNOSTIC_BYTES));
        }
        Ok(())
    }
}

fn default_compiler_program() -> String {
    "pdflatex".to_string()
}

fn default_compile_timeout() -> u64 {
    30
}

fn default_compile_passes() -> u32 {
    2
}

fn default_max_diagnostic_bytes() -> usize {
    64 * 1024
}
