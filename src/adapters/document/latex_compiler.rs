//! LaTeX compiler adapter.
//!
//! Drives a `pdflatex`-compatible program as a child process. The compiler
//! runs a fixed number of passes (two by default) because cross-references
//! written on the first pass are only resolved on the next one. Intermediate
//! passes are allowed to fail; only the final pass's exit status counts.
//!
//! # Invocation
//!
//! ```text
//! {program} -interaction=nonstopmode -output-directory={workspace} {workspace}/document.tex
//! ```
//!
//! stdin is closed, so the compiler can never stall waiting for terminal
//! input. stdout and stderr are read line by line, each line logged at
//! `debug` and appended to a size-capped [`DiagnosticBuffer`].

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::Command;

use crate::domain::document::RenderedSource;
use crate::ports::{CompilationError, DocumentCompiler};

/// Name of the source file written into the workspace.
pub const SOURCE_FILE_NAME: &str = "document.tex";

/// Name of the artifact the compiler is expected to produce.
pub const OUTPUT_FILE_NAME: &str = "document.pdf";

/// Compiler passes per document.
pub const DEFAULT_PASSES: u32 = 2;

/// Default per-pass time budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on captured compiler output (64 KiB).
pub const DEFAULT_MAX_DIAGNOSTIC_BYTES: usize = 64 * 1024;

/// Compiler adapter for `pdflatex` and compatible engines.
///
/// # Example
///
/// ```rust,ignore
/// let compiler = LatexCompiler::new()
///     .with_program("/usr/bin/pdflatex")
///     .with_timeout(Duration::from_secs(30));
///
/// let pdf_path = compiler.compile(&source, workspace.path()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    passes: u32,
    timeout: Duration,
    max_diagnostic_bytes: usize,
}

impl Default for LatexCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl LatexCompiler {
    pub fn new() -> Self {
        Self {
            program: "pdflatex".to_string(),
            passes: DEFAULT_PASSES,
            timeout: DEFAULT_TIMEOUT,
            max_diagnostic_bytes: DEFAULT_MAX_DIAGNOSTIC_BYTES,
        }
    }

    /// Set the compiler executable (name on PATH or absolute path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the number of passes. Values below one are raised to one.
    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes.max(1);
        self
    }

    /// Set the time budget for each pass.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how many bytes of compiler output to keep.
    pub fn with_max_diagnostic_bytes(mut self, max_bytes: usize) -> Self {
        self.max_diagnostic_bytes = max_bytes;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn write_source(
        &self,
        source: &RenderedSource,
        workspace: &Path,
    ) -> Result<PathBuf, CompilationError> {
        let tex_path = workspace.join(SOURCE_FILE_NAME);
        fs::write(&tex_path, source.as_str().as_bytes())
            .await
            .map_err(|e| CompilationError::SourceWriteFailed {
                path: tex_path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(tex_path)
    }

    /// Runs one compiler invocation to completion or timeout.
    async fn run_pass(
        &self,
        pass: u32,
        tex_path: &Path,
        workspace: &Path,
        diagnostics: &mut DiagnosticBuffer,
    ) -> Result<ExitStatus, CompilationError> {
        let mut child = Command::new(&self.program)
            .arg("-interaction=nonstopmode")
            .arg(format!("-output-directory={}", workspace.display()))
            .arg(tex_path)
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CompilationError::SpawnFailed {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        let max_line = self.max_diagnostic_bytes;
        let stdout =
            stream::iter(child.stdout.take()).flat_map(move |out| line_stream(out, max_line));
        let stderr =
            stream::iter(child.stderr.take()).flat_map(move |err| line_stream(err, max_line));
        let program = self.program.as_str();

        let run = async {
            let mut output = std::pin::pin!(stream::select(stdout, stderr));
            while let Some(line) = output.next().await {
                tracing::debug!(pass, "{}: {}", program, line);
                diagnostics.push_line(&line);
            }
            child.wait().await
        };

        let outcome = tokio::time::timeout(self.timeout, run).await;
        match outcome {
            Ok(Ok(status)) => {
                tracing::debug!(pass, status = %status, "Compiler pass finished");
                Ok(status)
            }
            Ok(Err(e)) => Err(CompilationError::SpawnFailed {
                program: self.program.clone(),
                reason: format!("failed waiting for compiler: {}", e),
            }),
            Err(_) => {
                tracing::warn!(pass, timeout = ?self.timeout, "Compiler pass timed out, killing");
                if let Err(e) = child.kill().await {
                    tracing::warn!(error = %e, "Failed to kill timed-out compiler");
                }
                Err(CompilationError::Timeout {
                    pass,
                    timeout: self.timeout,
                    diagnostics: diagnostics.contents(),
                })
            }
        }
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(
        &self,
        source: &RenderedSource,
        workspace: &Path,
    ) -> Result<PathBuf, CompilationError> {
        let tex_path = self.write_source(source, workspace).await?;
        let mut diagnostics = DiagnosticBuffer::new(self.max_diagnostic_bytes);

        let mut final_status = None;
        for pass in 1..=self.passes {
            let status = self
                .run_pass(pass, &tex_path, workspace, &mut diagnostics)
                .await?;
            if !status.success() && pass < self.passes {
                tracing::debug!(pass, status = %status, "Non-final pass failed, continuing");
            }
            final_status = Some(status);
        }

        if let Some(status) = final_status.filter(|s| !s.success()) {
            return Err(CompilationError::NonZeroExit {
                exit_code: status.code(),
                diagnostics: diagnostics.contents(),
            });
        }

        let output = workspace.join(OUTPUT_FILE_NAME);
        if !fs::try_exists(&output).await.unwrap_or(false) {
            return Err(CompilationError::MissingOutput {
                path: output.display().to_string(),
                diagnostics: diagnostics.contents(),
            });
        }

        tracing::info!(output = %output.display(), passes = self.passes, "Document compiled");
        Ok(output)
    }
}

/// Yields lines from `reader` until EOF or a read error.
///
/// A line longer than `max_line_bytes` is yielded in chunks of at most that
/// size, so output without newlines never accumulates unbounded. Bytes are
/// decoded lossily; TeX engines often emit Latin-1.
fn line_stream<R>(reader: R, max_line_bytes: usize) -> impl Stream<Item = String>
where
    R: AsyncRead + Unpin,
{
    let limit = max_line_bytes.max(1) as u64;
    stream::unfold(BufReader::new(reader), move |mut reader| async move {
        let mut buf = Vec::new();
        let read = (&mut reader).take(limit).read_until(b'\n', &mut buf).await;
        match read {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf)
                    .trim_end_matches(&['\r', '\n'][..])
                    .to_string();
                Some((line, reader))
            }
        }
    })
}

/// Keeps the most recent compiler output within a byte budget.
#[derive(Debug, Clone)]
pub struct DiagnosticBuffer {
    lines: VecDeque<String>,
    bytes: usize,
    max_bytes: usize,
    truncated: bool,
}

impl DiagnosticBuffer {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            bytes: 0,
            max_bytes,
            truncated: false,
        }
    }

    /// Appends a line, evicting the oldest lines once over budget.
    ///
    /// A single line longer than the budget keeps only its tail.
    pub fn push_line(&mut self, line: &str) {
        let budget = self.max_bytes.saturating_sub(1);
        if line.len() > budget {
            self.truncated = true;
        }
        let line = tail(line, budget);
        self.bytes += line.len() + 1;
        self.lines.push_back(line.to_string());

        while self.bytes > self.max_bytes {
            match self.lines.pop_front() {
                Some(old) => {
                    self.bytes -= old.len() + 1;
                    self.truncated = true;
                }
                None => break,
            }
        }
    }

    /// The retained output, newline-joined, marked if anything was dropped.
    pub fn contents(&self) -> String {
        let mut out = String::with_capacity(self.bytes + 40);
        if self.truncated {
            out.push_str("[earlier compiler output truncated]\n");
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// The last `max` bytes of `s`, cut on a char boundary.
fn tail(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
