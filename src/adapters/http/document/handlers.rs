//! HTTP handlers for document endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::document::{
    CreateDocumentCommand, CreateDocumentError, CreateDocumentHandler, DocumentPipeline,
    GetDocumentError, GetDocumentHandler, GetDocumentQuery, PipelineError,
    ReplaceDocumentCommand, ReplaceDocumentError, ReplaceDocumentHandler,
};
use crate::domain::document::{ArtifactFileName, PersistedDocument};
use crate::domain::foundation::DocumentId;
use crate::ports::{CompilationError, DocumentRepository};

use super::dto::{DocumentMetadataResponse, DocumentPayload, ErrorResponse, HealthResponse};

/// Response header carrying the identifier of the stored record.
pub const DOCUMENT_ID_HEADER: &str = "x-document-id";

const PDF_CONTENT_TYPE: &str = "application/pdf";
const TEX_CONTENT_TYPE: &str = "text/x-tex; charset=utf-8";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct DocumentAppState {
    pub pipeline: Arc<DocumentPipeline>,
    pub repository: Arc<dyn DocumentRepository>,
}

impl DocumentAppState {
    pub fn create_document_handler(&self) -> CreateDocumentHandler {
        CreateDocumentHandler::new(self.pipeline.clone(), self.repository.clone())
    }

    pub fn replace_document_handler(&self) -> ReplaceDocumentHandler {
        ReplaceDocumentHandler::new(self.pipeline.clone(), self.repository.clone())
    }

    pub fn get_document_handler(&self) -> GetDocumentHandler {
        GetDocumentHandler::new(self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/documents/latex - Generate, store and return a PDF
pub async fn create_document(
    State(state): State<DocumentAppState>,
    Json(payload): Json<DocumentPayload>,
) -> Result<Response, DocumentApiError> {
    let handler = state.create_document_handler();
    let cmd = CreateDocumentCommand {
        request: payload.into(),
    };

    let document = handler.handle(cmd).await?;

    Ok(pdf_response(&document))
}

/// PUT /api/documents/:id - Regenerate a document from new metadata
pub async fn replace_document(
    State(state): State<DocumentAppState>,
    Path(id): Path<String>,
    Json(payload): Json<DocumentPayload>,
) -> Result<impl IntoResponse, DocumentApiError> {
    let id = parse_document_id(&id)?;

    let handler = state.replace_document_handler();
    let cmd = ReplaceDocumentCommand {
        id,
        request: payload.into(),
    };

    let document = handler.handle(cmd).await?;

    Ok(Json(DocumentMetadataResponse::from(&document)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/documents/:id - Download the stored PDF
pub async fn get_document(
    State(state): State<DocumentAppState>,
    Path(id): Path<String>,
) -> Result<Response, DocumentApiError> {
    let document = fetch(&state, &id).await?;
    Ok(pdf_response(&document))
}

/// GET /api/documents/:id/metadata - Stored record without the PDF
pub async fn get_document_metadata(
    State(state): State<DocumentAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DocumentApiError> {
    let document = fetch(&state, &id).await?;
    Ok(Json(DocumentMetadataResponse::from(&document)))
}

/// GET /api/documents/:id/source - Rendered LaTeX source
pub async fn get_document_source(
    State(state): State<DocumentAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, DocumentApiError> {
    let document = fetch(&state, &id).await?;
    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(TEX_CONTENT_TYPE))],
        document.content.into_string(),
    ))
}

/// GET /health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

async fn fetch(state: &DocumentAppState, id: &str) -> Result<PersistedDocument, DocumentApiError> {
    let id = parse_document_id(id)?;
    let handler = state.get_document_handler();
    Ok(handler.handle(GetDocumentQuery { id }).await?)
}

fn parse_document_id(raw: &str) -> Result<DocumentId, DocumentApiError> {
    raw.parse()
        .map_err(|e| DocumentApiError::BadRequest(format!("Invalid document ID '{}': {}", raw, e)))
}

// ════════════════════════════════════════════════════════════════════════════════
// PDF Responses
// ════════════════════════════════════════════════════════════════════════════════

/// `200 application/pdf` with an attachment disposition and the record id.
pub fn pdf_response(document: &PersistedDocument) -> Response {
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE)),
        (
            header::CONTENT_DISPOSITION,
            content_disposition(&document.file_name),
        ),
        (
            HeaderName::from_static(DOCUMENT_ID_HEADER),
            HeaderValue::from(document.id.as_i64()),
        ),
    ];
    (StatusCode::OK, headers, document.pdf_content.clone()).into_response()
}

/// `attachment; filename="..."`, adding an RFC 5987 `filename*` for
/// non-ASCII names.
fn content_disposition(file_name: &ArtifactFileName) -> HeaderValue {
    let name = file_name.as_str();
    let ascii: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let value = if ascii == name {
        format!("attachment; filename=\"{}\"", ascii)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            ascii,
            urlencoding::encode(name)
        )
    };

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum DocumentApiError {
    BadRequest(String),
    NotFound(String),
    CompilationFailed {
        message: String,
        diagnostics: Option<String>,
    },
    CompilationTimeout {
        message: String,
        diagnostics: Option<String>,
    },
    Internal(String),
}

impl From<PipelineError> for DocumentApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidRequest(e) => DocumentApiError::BadRequest(e.to_string()),
            PipelineError::Compilation(e) => compilation_error(e),
            PipelineError::TemplateRead(e) => DocumentApiError::Internal(e.to_string()),
            PipelineError::Storage(e) => DocumentApiError::Internal(e.to_string()),
        }
    }
}

fn compilation_error(err: CompilationError) -> DocumentApiError {
    let message = err.to_string();
    let diagnostics = err.diagnostics().map(str::to_string);
    match err {
        CompilationError::Timeout { .. } => DocumentApiError::CompilationTimeout {
            message,
            diagnostics,
        },
        CompilationError::NonZeroExit { .. } | CompilationError::MissingOutput { .. } => {
            DocumentApiError::CompilationFailed {
                message,
                diagnostics,
            }
        }
        // The compiler never ran: a deployment problem, not a document problem.
        CompilationError::SpawnFailed { .. } | CompilationError::SourceWriteFailed { .. } => {
            DocumentApiError::Internal(message)
        }
    }
}

impl From<CreateDocumentError> for DocumentApiError {
    fn from(err: CreateDocumentError) -> Self {
        match err {
            CreateDocumentError::Pipeline(e) => e.into(),
            CreateDocumentError::Persistence(e) => DocumentApiError::Internal(e.to_string()),
        }
    }
}

impl From<ReplaceDocumentError> for DocumentApiError {
    fn from(err: ReplaceDocumentError) -> Self {
        match err {
            ReplaceDocumentError::NotFound(e) => DocumentApiError::NotFound(e.id().to_string()),
            ReplaceDocumentError::Pipeline(e) => e.into(),
            ReplaceDocumentError::Persistence(e) => DocumentApiError::Internal(e.to_string()),
        }
    }
}

impl From<GetDocumentError> for DocumentApiError {
    fn from(err: GetDocumentError) -> Self {
        match err {
            GetDocumentError::NotFound(e) => DocumentApiError::NotFound(e.id().to_string()),
            GetDocumentError::Persistence(e) => DocumentApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for DocumentApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            DocumentApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            DocumentApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found("Document", &id))
            }
            DocumentApiError::CompilationFailed {
                message,
                diagnostics,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::compilation_failed(message, diagnostics),
            ),
            DocumentApiError::CompilationTimeout {
                message,
                diagnostics,
            } => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorResponse::compilation_timeout(message, diagnostics),
            ),
            DocumentApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Document request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
