//! Recognized template placeholders.

use std::fmt;

use super::DocumentRequest;

/// A fixed marker in the template, replaced verbatim on render.
///
/// Each placeholder has an English token and, for templates authored in
/// Spanish, a legacy token (`{{nombreProyecto}}`, `{{tablaRoles}}`, ...).
/// `{{director}}` is shared by both. All tokens are pairwise disjoint and
/// none contains another, so substitution order never affects the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    ProjectName,
    ProjectId,
    ElaborationDate,
    CompanyName,
    ClientName,
    Sponsor,
    Director,
    RolesTable,
}

impl Placeholder {
    /// Every recognized placeholder.
    pub const ALL: [Placeholder; 8] = [
        Placeholder::ProjectName,
        Placeholder::ProjectId,
        Placeholder::ElaborationDate,
        Placeholder::CompanyName,
        Placeholder::ClientName,
        Placeholder::Sponsor,
        Placeholder::Director,
        Placeholder::RolesTable,
    ];

    /// The literal token as it appears in templates.
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::ProjectName => "{{projectName}}",
            Placeholder::ProjectId => "{{projectId}}",
            Placeholder::ElaborationDate => "{{elaborationDate}}",
            Placeholder::CompanyName => "{{companyName}}",
            Placeholder::ClientName => "{{clientName}}",
            Placeholder::Sponsor => "{{sponsor}}",
            Placeholder::Director => "{{director}}",
            Placeholder::RolesTable => "{{rolesTable}}",
        }
    }

    /// The Spanish-language token, where it differs from [`Self::token`].
    pub fn legacy_token(&self) -> Option<&'static str> {
        match self {
            Placeholder::ProjectName => Some("{{nombreProyecto}}"),
            Placeholder::ProjectId => Some("{{idProyecto}}"),
            Placeholder::ElaborationDate => Some("{{fechaElaboracion}}"),
            Placeholder::CompanyName => Some("{{empresaNombre}}"),
            Placeholder::ClientName => Some("{{clienteNombre}}"),
            Placeholder::Sponsor => Some("{{patrocinador}}"),
            Placeholder::Director => None,
            Placeholder::RolesTable => Some("{{tablaRoles}}"),
        }
    }

    /// Every token recognized for this placeholder.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.token()).chain(self.legacy_token())
    }

    /// The request field backing this placeholder.
    ///
    /// Returns `None` for [`Placeholder::RolesTable`], whose value is a
    /// generated fragment rather than a field.
    pub fn field<'a>(&self, request: &'a DocumentRequest) -> Option<&'a str> {
        let value = match self {
            Placeholder::ProjectName => &request.project_name,
            Placeholder::ProjectId => &request.project_id,
            Placeholder::ElaborationDate => &request.elaboration_date,
            Placeholder::CompanyName => &request.company_name,
            Placeholder::ClientName => &request.client_name,
            Placeholder::Sponsor => &request.sponsor,
            Placeholder::Director => &request.director,
            Placeholder::RolesTable => return None,
        };
        Some(value.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
