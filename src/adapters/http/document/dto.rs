//! HTTP DTOs (Data Transfer Objects) for document endpoints.
//!
//! These types define the JSON request/response structure for the document API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::document::{DocumentRequest, PersistedDocument};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Project metadata for generating (or regenerating) a charter.
///
/// Every field is optional; `projectName` is validated by the pipeline.
/// The Spanish field names used by older clients are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    #[serde(alias = "nombreProyecto")]
    pub project_name: Option<String>,
    #[serde(alias = "idProyecto")]
    pub project_id: Option<String>,
    #[serde(alias = "fechaElaboracion")]
    pub elaboration_date: Option<String>,
    #[serde(alias = "empresaNombre")]
    pub company_name: Option<String>,
    #[serde(alias = "clienteNombre")]
    pub client_name: Option<String>,
    #[serde(alias = "patrocinador")]
    pub sponsor: Option<String>,
    pub director: Option<String>,
    /// Rows separated by `&`, columns by `,`.
    #[serde(alias = "rolesResponsabilidades")]
    pub roles_responsibilities: Option<String>,
}

impl From<DocumentPayload> for DocumentRequest {
    fn from(payload: DocumentPayload) -> Self {
        DocumentRequest {
            project_name: payload.project_name,
            project_id: payload.project_id,
            elaboration_date: payload.elaboration_date,
            company_name: payload.company_name,
            client_name: payload.client_name,
            sponsor: payload.sponsor,
            director: payload.director,
            roles_responsibilities: payload.roles_responsibilities,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Stored document without its PDF bytes or rendered source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadataResponse {
    pub id: i64,
    pub file_name: String,
    pub checksum: String,
    pub size_bytes: usize,
    pub project_name: Option<String>,
    pub project_id: Option<String>,
    pub elaboration_date: Option<String>,
    pub company_name: Option<String>,
    pub client_name: Option<String>,
    pub sponsor: Option<String>,
    pub director: Option<String>,
    pub roles_responsibilities: Option<String>,
    /// RFC 3339.
    pub created_at: String,
    /// RFC 3339.
    pub updated_at: String,
}

impl From<&PersistedDocument> for DocumentMetadataResponse {
    fn from(doc: &PersistedDocument) -> Self {
        let meta = &doc.metadata;
        Self {
            id: doc.id.as_i64(),
            file_name: doc.file_name.to_string(),
            checksum: doc.checksum.clone(),
            size_bytes: doc.pdf_content.len(),
            project_name: meta.project_name.clone(),
            project_id: meta.project_id.clone(),
            elaboration_date: meta.elaboration_date.clone(),
            company_name: meta.company_name.clone(),
            client_name: meta.client_name.clone(),
            sponsor: meta.sponsor.clone(),
            director: meta.director.clone(),
            roles_responsibilities: meta.roles_responsibilities.clone(),
            created_at: doc.created_at.to_rfc3339(),
            updated_at: doc.updated_at.to_rfc3339(),
        }
    }
}

/// Liveness check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn not_found(resource: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource, id),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Compiler failure, with its captured output when available.
    pub fn compilation_failed(message: impl Into<String>, diagnostics: Option<String>) -> Self {
        Self {
            code: "COMPILATION_FAILED".to_string(),
            message: message.into(),
            details: diagnostics.map(|d| serde_json::json!({ "diagnostics": d })),
        }
    }

    pub fn compilation_timeout(message: impl Into<String>, diagnostics: Option<String>) -> Self {
        Self {
            code: "COMPILATION_TIMEOUT".to_string(),
            ..Self::compilation_failed(message, diagnostics)
        }
    }
}
