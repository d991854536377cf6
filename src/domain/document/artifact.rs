//! Rendered source and compiled artifact value objects.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Extension of every stored artifact.
pub const ARTIFACT_EXTENSION: &str = "pdf";

/// Template text after placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedSource(String);

impl RenderedSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Filename under which an artifact is stored, derived from the project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactFileName(String);

impl ArtifactFileName {
    /// Collapses each whitespace run in `project_name` to a single `_` and
    /// appends the artifact extension. Leading and trailing whitespace runs
    /// collapse too; nothing is trimmed.
    pub fn from_project_name(project_name: &str) -> Self {
        let mut stem = String::with_capacity(project_name.len());
        let mut in_whitespace = false;
        for ch in project_name.chars() {
            if ch.is_whitespace() {
                if !in_whitespace {
                    stem.push('_');
                }
                in_whitespace = true;
            } else {
                stem.push(ch);
                in_whitespace = false;
            }
        }
        Self(format!("{}.{}", stem, ARTIFACT_EXTENSION))
    }

    /// Wraps a filename loaded from storage.
    pub fn from_stored(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compiled output, read fully into memory after the compiler confirmed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifact {
    file_name: ArtifactFileName,
    bytes: Vec<u8>,
    checksum: String,
}

impl CompiledArtifact {
    /// Creates the artifact, computing its SHA-256 checksum.
    pub fn new(file_name: ArtifactFileName, bytes: Vec<u8>) -> Self {
        let checksum = Self::compute_checksum(&bytes);
        Self {
            file_name,
            bytes,
            checksum,
        }
    }

    /// Computes SHA-256 checksum of artifact bytes.
    pub fn compute_checksum(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    pub fn file_name(&self) -> &ArtifactFileName {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn into_parts(self) -> (ArtifactFileName, Vec<u8>, String) {
        (self.file_name, self.bytes, self.checksum)
    }
}
