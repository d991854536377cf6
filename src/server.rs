//! Service wiring: adapters, pipeline, router and middleware.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::document::{
    FileTemplateSource, LatexCompiler, LatexTemplateRenderer, LocalArtifactStore,
    WorkspaceManager,
};
use crate::adapters::http::{document_router, DocumentAppState};
use crate::application::handlers::DocumentPipeline;
use crate::config::{DocumentConfig, ServerConfig};
use crate::ports::{DocumentRepository, StorageError};

/// Builds the generation pipeline from configuration.
///
/// Workspaces and stored artifacts share `output_path`.
pub fn pipeline_from_config(config: &DocumentConfig) -> DocumentPipeline {
    let compiler = LatexCompiler::new()
        .with_program(config.compiler_program.clone())
        .with_passes(config.compile_passes)
        .with_timeout(config.compile_timeout())
        .with_max_diagnostic_bytes(config.max_diagnostic_bytes);

    DocumentPipeline::new(
        Arc::new(FileTemplateSource::new(&config.template_path)),
        Arc::new(LatexTemplateRenderer::new()),
        WorkspaceManager::new(&config.output_path),
        Arc::new(compiler),
        Arc::new(LocalArtifactStore::new(&config.output_path)),
    )
}

/// Clears workspaces and partial artifact writes left by a previous process.
///
/// Must run before the listener accepts requests.
pub async fn clean_output_dir(config: &DocumentConfig) -> Result<(), StorageError> {
    WorkspaceManager::new(&config.output_path)
        .remove_stale_workspaces()
        .await?;
    LocalArtifactStore::new(&config.output_path)
        .remove_stale_temp_files()
        .await?;
    Ok(())
}

/// Builds application state for the document routes.
pub fn app_state(
    config: &DocumentConfig,
    repository: Arc<dyn DocumentRepository>,
) -> DocumentAppState {
    DocumentAppState {
        pipeline: Arc::new(pipeline_from_config(config)),
        repository,
    }
}

/// Builds the full router with tracing, timeout and CORS middleware.
pub fn router(state: DocumentAppState, server: &ServerConfig) -> Router {
    document_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
