//! Placeholder-substituting template renderer for LaTeX templates.
//!
//! Fills the eight recognized placeholders (English or legacy Spanish tokens)
//! from a [`DocumentRequest`] and expands `{{rolesTable}}` / `{{tablaRoles}}`
//! into a `longtable` built from the request's roles/responsibilities blob.

use crate::domain::document::{DocumentRequest, Placeholder, RenderedSource, RolesTable};
use crate::ports::TemplateRenderer;

const TABLE_HEADER: &str = "\\begin{center}\n\
\\begin{longtable}{|c|c|c|c|}\n\
\\hline\n\
\\textbf{ID} & \\textbf{Role} & \\textbf{Function} & \\textbf{Responsibility} \\\\\n\
\\hline\n";

const TABLE_FOOTER: &str = "\\end{longtable}\n\\end{center}\n";

const ROW_SEPARATOR: &str = "\\hline\n";

/// Renders templates by literal, single-pass placeholder substitution.
///
/// Substituted values are never rescanned, so a field whose text happens to
/// look like a placeholder is emitted as-is.
#[derive(Debug, Clone, Default)]
pub struct LatexTemplateRenderer;

impl LatexTemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the roles table fragment, or `""` when the blob is absent or blank.
    pub fn roles_table_fragment(roles: Option<&str>) -> String {
        let Some(table) = RolesTable::from_optional(roles) else {
            return String::new();
        };

        let mut fragment = String::from(TABLE_HEADER);
        for row in table.rows() {
            fragment.push_str(&format!(
                "{} & {} & {} & {} \\\\\n",
                row.id, row.role, row.function, row.responsibility
            ));
            fragment.push_str(ROW_SEPARATOR);
        }
        fragment.push_str(TABLE_FOOTER);
        fragment
    }

    /// The token/value pairs for `request`, in [`Placeholder::ALL`] order.
    ///
    /// Legacy tokens map to the same value as their English counterpart.
    pub fn replacements(request: &DocumentRequest) -> Vec<(&'static str, String)> {
        let table = Self::roles_table_fragment(request.roles_responsibilities.as_deref());
        Placeholder::ALL
            .iter()
            .flat_map(|p| {
                let value = match p.field(request) {
                    Some(field) => field.to_string(),
                    None => table.clone(),
                };
                p.tokens().map(move |token| (token, value.clone()))
            })
            .collect()
    }
}

impl TemplateRenderer for LatexTemplateRenderer {
    fn render(&self, template: &str, request: &DocumentRequest) -> RenderedSource {
        let replacements = Self::replacements(request);
        let pairs: Vec<(&str, &str)> = replacements
            .iter()
            .map(|(token, value)| (*token, value.as_str()))
            .collect();
        RenderedSource::new(substitute(template, &pairs))
    }
}

/// Replaces every occurrence of each token in one left-to-right pass.
///
/// At each position the earliest match wins, ties going to the longest
/// token, so the result does not depend on the order of `replacements`.
pub fn substitute(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = replacements
            .iter()
            .filter(|(token, _)| !token.is_empty())
            .filter_map(|(token, value)| rest.find(token).map(|at| (at, *token, *value)))
            .min_by_key(|(at, token, _)| (*at, std::cmp::Reverse(token.len())));

        match next {
            Some((at, token, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + token.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_request() -> DocumentRequest {
        DocumentRequest {
            project_name: Some("Alpha One".to_string()),
            project_id: Some("PRJ-001".to_string()),
            elaboration_date: Some("2024-03-01".to_string()),
            company_name: Some("Acme".to_string()),
            client_name: Some("Globex".to_string()),
            sponsor: Some("Sam".to_string()),
            director: Some("Dana".to_string()),
            roles_responsibilities: Some("1,PM,Plan,Schedule&2,Dev,Build,Code".to_string()),
        }
    }

    fn template_with_all_placeholders() -> String {
        Placeholder::ALL
            .iter()
            .flat_map(|p| p.tokens())
            .map(|token| format!("[{}]", token))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ───────────────────────────────────────────────────────────────
    // Substitution
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn render_replaces_every_placeholder() {
        let rendered = LatexTemplateRenderer::new()
            .render(&template_with_all_placeholders(), &full_request());
        let text = rendered.as_str();

        for token in Placeholder::ALL.iter().flat_map(|p| p.tokens()) {
            assert!(!text.contains(token), "{} left in output", token);
        }
        assert!(text.contains("[Alpha One]"));
        assert!(text.contains("[PRJ-001]"));
        assert!(text.contains("[2024-03-01]"));
        assert!(text.contains("[Acme]"));
        assert!(text.contains("[Globex]"));
        assert!(text.contains("[Sam]"));
        assert!(text.contains("[Dana]"));
        assert!(text.contains("\\begin{longtable}"));
    }

    #[test]
    fn render_uses_empty_string_for_absent_fields() {
        let rendered = LatexTemplateRenderer::new().render(
            "a{{sponsor}}b{{director}}c{{rolesTable}}d",
            &DocumentRequest::named("X"),
        );
        assert_eq!(rendered.as_str(), "abcd");
    }

    #[test]
    fn render_replaces_repeated_occurrences() {
        let rendered = LatexTemplateRenderer::new().render(
            "{{projectName}} / {{projectName}}",
            &DocumentRequest::named("Beta"),
        );
        assert_eq!(rendered.as_str(), "Beta / Beta");
    }

    #[test]
    fn render_passes_unknown_markers_through() {
        let template = "{{unknown}} {projectName} {{ projectName }} \\section{Intro}";
        let rendered = LatexTemplateRenderer::new().render(template, &full_request());
        assert_eq!(rendered.as_str(), template);
    }

    #[test]
    fn render_does_not_rescan_substituted_values() {
        let request = DocumentRequest {
            director: Some("Dana".to_string()),
            ..DocumentRequest::named("{{director}}")
        };
        let rendered = LatexTemplateRenderer::new().render("{{projectName}}|{{director}}", &request);
        assert_eq!(rendered.as_str(), "{{director}}|Dana");
    }

    #[test]
    fn render_fills_spanish_template_markers() {
        let template = "\\title{{{nombreProyecto}}} {{idProyecto}} {{fechaElaboracion}} \
{{empresaNombre}} {{clienteNombre}} {{patrocinador}} {{director}}|{{tablaRoles}}";
        let rendered = LatexTemplateRenderer::new().render(template, &full_request());
        let text = rendered.as_str();

        assert!(text.starts_with("\\title{Alpha One} PRJ-001 2024-03-01 Acme Globex Sam Dana|"));
        assert!(text.contains("1 & PM & Plan & Schedule \\\\"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn render_mixes_english_and_spanish_markers() {
        let rendered = LatexTemplateRenderer::new().render(
            "{{nombreProyecto}}/{{projectName}}|{{tablaRoles}}",
            &DocumentRequest::named("Alpha One"),
        );
        assert_eq!(rendered.as_str(), "Alpha One/Alpha One|");
    }

    #[test]
    fn render_is_repeatable() {
        let renderer = LatexTemplateRenderer::new();
        let template = template_with_all_placeholders();
        let first = renderer.render(&template, &full_request());
        let second = renderer.render(&template, &full_request());
        assert_eq!(first, second);
    }

    // ───────────────────────────────────────────────────────────────
    // Roles table
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn roles_table_fragment_is_empty_for_blank_input() {
        assert_eq!(LatexTemplateRenderer::roles_table_fragment(None), "");
        assert_eq!(LatexTemplateRenderer::roles_table_fragment(Some("")), "");
        assert_eq!(LatexTemplateRenderer::roles_table_fragment(Some(" \n ")), "");
    }

    #[test]
    fn roles_table_fragment_has_exact_layout() {
        let fragment = LatexTemplateRenderer::roles_table_fragment(Some("1,PM,Plan,Schedule"));
        let expected = "\\begin{center}\n\
\\begin{longtable}{|c|c|c|c|}\n\
\\hline\n\
\\textbf{ID} & \\textbf{Role} & \\textbf{Function} & \\textbf{Responsibility} \\\\\n\
\\hline\n\
1 & PM & Plan & Schedule \\\\\n\
\\hline\n\
\\end{longtable}\n\
\\end{center}\n";
        assert_eq!(fragment, expected);
    }

    #[test]
    fn roles_table_fragment_keeps_order_and_drops_short_rows() {
        let fragment = LatexTemplateRenderer::roles_table_fragment(Some(
            "1,PM,Plan,Schedule&bad,row&2,Dev,Build,Code,extra",
        ));

        let first = fragment.find("1 & PM & Plan & Schedule").unwrap();
        let second = fragment.find("2 & Dev & Build & Code \\\\").unwrap();
        assert!(first < second);
        assert!(!fragment.contains("bad"));
        assert!(!fragment.contains("extra"));
    }

    #[test]
    fn roles_table_fragment_with_only_malformed_rows_keeps_frame() {
        let fragment = LatexTemplateRenderer::roles_table_fragment(Some("a,b&c"));
        assert_eq!(fragment, format!("{}{}", TABLE_HEADER, TABLE_FOOTER));
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn template_without_placeholders_is_unchanged(template in "[^{}]*") {
            let rendered = LatexTemplateRenderer::new().render(&template, &full_request());
            prop_assert_eq!(rendered.as_str(), template.as_str());
        }

        #[test]
        fn substitution_order_does_not_matter(
            order in Just(
                (0..LatexTemplateRenderer::replacements(&full_request()).len()).collect::<Vec<_>>()
            ).prop_shuffle(),
            filler in "[a-z \\\\]{0,12}",
        ) {
            let request = full_request();
            let template = format!("{}{}{}", filler, template_with_all_placeholders(), filler);
            let replacements = LatexTemplateRenderer::replacements(&request);

            let canonical: Vec<(&str, &str)> = replacements
                .iter()
                .map(|(t, v)| (*t, v.as_str()))
                .collect();
            let shuffled: Vec<(&str, &str)> = order.iter().map(|&i| canonical[i]).collect();

            prop_assert_eq!(substitute(&template, &shuffled), substitute(&template, &canonical));
            prop_assert_eq!(
                substitute(&template, &canonical),
                LatexTemplateRenderer::new().render(&template, &request).into_string()
            );
        }
    }
}
