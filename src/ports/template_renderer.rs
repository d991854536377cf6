//! Template Renderer Port - Placeholder substitution interface.

use crate::domain::document::{DocumentRequest, RenderedSource};

/// Port for rendering project metadata into a template.
///
/// # Contract
///
/// Implementations must:
/// - Replace every occurrence of each recognized placeholder
/// - Render absent fields as the empty string
/// - Pass all other template text through byte-for-byte
/// - Be pure: identical inputs give identical output, with no side effects
pub trait TemplateRenderer: Send + Sync {
    /// Renders `request` into `template`.
    fn render(&self, template: &str, request: &DocumentRequest) -> RenderedSource;
}
