//! Caller-supplied project metadata.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Project metadata submitted for document generation.
///
/// Every field is optional at the type level: absent fields render as empty
/// strings. Only the project name is mandatory, since the stored artifact's
/// filename is derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    pub project_name: Option<String>,
    pub project_id: Option<String>,
    pub elaboration_date: Option<String>,
    pub company_name: Option<String>,
    pub client_name: Option<String>,
    pub sponsor: Option<String>,
    pub director: Option<String>,
    /// Rows separated by `&`, columns by `,`.
    pub roles_responsibilities: Option<String>,
}

impl DocumentRequest {
    /// Creates a request with only the project name set.
    pub fn named(project_name: impl Into<String>) -> Self {
        Self {
            project_name: Some(project_name.into()),
            ..Default::default()
        }
    }

    /// Checks the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.project_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::empty_field("project_name")),
        }
    }

    /// The project name, or the empty string when absent.
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or_default()
    }
}
