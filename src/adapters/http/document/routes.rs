//! Route configuration for document endpoints.
//!
//! Configures Axum router with document-related routes.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_document, get_document, get_document_metadata, get_document_source, health,
    replace_document, DocumentAppState,
};

/// Creates the document router with all endpoints.
///
/// Routes:
/// - `POST /api/documents/latex` - Generate a PDF from project metadata
/// - `GET /api/documents/:id` - Download a stored PDF
/// - `PUT /api/documents/:id` - Regenerate and replace a stored document
/// - `GET /api/documents/:id/metadata` - Stored metadata as JSON
/// - `GET /api/documents/:id/source` - Rendered LaTeX source
/// - `GET /health` - Liveness check
pub fn document_router() -> Router<DocumentAppState> {
    Router::new()
        .route("/api/documents/latex", post(create_document))
        .route(
            "/api/documents/:id",
            get(get_document).put(replace_document),
        )
        .route("/api/documents/:id/metadata", get(get_document_metadata))
        .route("/api/documents/:id/source", get(get_document_source))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDocumentRepository;
    use crate::application::handlers::document::test_support::{
        pipeline_with, FakeCompiler, FakeTemplateSource,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(out: &TempDir, compiler: FakeCompiler) -> Router {
        let state = DocumentAppState {
            pipeline: Arc::new(pipeline_with(
                out.path(),
                Arc::new(FakeTemplateSource::ok("\\title{{{projectName}}}")),
                Arc::new(compiler),
            )),
            repository: Arc::new(InMemoryDocumentRepository::new()),
        };
        document_router().with_state(state)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn post_returns_pdf_attachment() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"%PDF-1.4 route"));

        let response = app
            .oneshot(post_json(
                "/api/documents/latex",
                r#"{"projectName": "Alpha One"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Alpha_One.pdf\""
        );
        assert_eq!(response.headers()["x-document-id"], "1");
        assert_eq!(body_bytes(response).await, b"%PDF-1.4 route");
    }

    #[tokio::test]
    async fn post_accepts_spanish_field_names() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"%PDF-1.4 route"));

        let response = app
            .oneshot(post_json(
                "/api/documents/latex",
                r#"{"nombreProyecto": "Fase Uno", "rolesResponsabilidades": "1,PM,Plan,Scope"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Fase_Uno.pdf\""
        );
    }

    #[tokio::test]
    async fn get_returns_same_bytes_as_post() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"%PDF-1.4 stored"));

        let created = app
            .clone()
            .oneshot(post_json("/api/documents/latex", r#"{"projectName": "Beta"}"#))
            .await
            .unwrap();
        let id = created.headers()["x-document-id"].to_str().unwrap().to_string();

        let response = app
            .oneshot(get(&format!("/api/documents/{}", id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"%PDF-1.4 stored");
    }

    #[tokio::test]
    async fn get_unknown_id_returns_404() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"pdf"));

        let response = app.oneshot(get("/api/documents/999")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn get_invalid_id_returns_400() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"pdf"));

        let response = app.oneshot(get("/api/documents/not-a-number")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_with_blank_project_name_returns_400() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"pdf"));

        let response = app
            .oneshot(post_json("/api/documents/latex", r#"{"projectName": "  "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_compile_failure_returns_422_with_diagnostics() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::failing());

        let response = app
            .oneshot(post_json("/api/documents/latex", r#"{"projectName": "Bad"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["code"], "COMPILATION_FAILED");
        assert!(body["details"]["diagnostics"]
            .as_str()
            .unwrap()
            .contains("missing.sty"));
    }

    #[tokio::test]
    async fn metadata_and_source_endpoints() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"pdf"));

        app.clone()
            .oneshot(post_json("/api/documents/latex", r#"{"projectName": "Gamma"}"#))
            .await
            .unwrap();

        let metadata = app
            .clone()
            .oneshot(get("/api/documents/1/metadata"))
            .await
            .unwrap();
        assert_eq!(metadata.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(metadata).await).unwrap();
        assert_eq!(body["fileName"], "Gamma.pdf");
        assert_eq!(body["projectName"], "Gamma");

        let source = app.oneshot(get("/api/documents/1/source")).await.unwrap();
        assert_eq!(source.status(), StatusCode::OK);
        assert_eq!(
            source.headers()[header::CONTENT_TYPE],
            "text/x-tex; charset=utf-8"
        );
        assert_eq!(body_bytes(source).await, b"\\title{Gamma}");
    }

    #[tokio::test]
    async fn put_replaces_existing_document() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"pdf"));

        app.clone()
            .oneshot(post_json("/api/documents/latex", r#"{"projectName": "Old"}"#))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/documents/1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"projectName": "New Name"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["fileName"], "New_Name.pdf");
    }

    #[tokio::test]
    async fn put_unknown_id_returns_404() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"pdf"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/documents/77")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"projectName": "X"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let out = TempDir::new().unwrap();
        let app = app(&out, FakeCompiler::producing(b"pdf"));

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ok");
    }
}
