//! PostgreSQL implementation of DocumentRepository.
//!
//! Stores the request metadata, rendered LaTeX source and compiled PDF bytes
//! in a single `documents` row.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::document::{
    ArtifactFileName, DocumentRequest, NewDocument, PersistedDocument, RenderedSource,
};
use crate::domain::foundation::{DocumentId, Timestamp};
use crate::ports::{DocumentRepository, PersistenceError};

/// Columns selected for every read, in `DocumentRow` order.
const DOCUMENT_COLUMNS: &str = r#"
    id, project_name, project_id, elaboration_date, company_name, client_name,
    sponsor, director, roles_responsibilities,
    content, file_name, pdf_content, checksum, created_at, updated_at
"#;

/// PostgreSQL implementation of the DocumentRepository port.
///
/// Identifiers come from the `BIGSERIAL` primary key. Replacement is a
/// single `UPDATE ... RETURNING`, so a record is never half-written.
///
/// # Usage
///
/// ```rust,ignore
/// let pool = PgPool::connect("postgres://...").await?;
/// let repo = PostgresDocumentRepository::new(pool);
///
/// let saved = repo.save(new_document).await?;
/// let found = repo.find_by_id(saved.id).await?;
/// ```
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresDocumentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDocumentRepository")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl PostgresDocumentRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: i64,
    project_name: Option<String>,
    project_id: Option<String>,
    elaboration_date: Option<String>,
    company_name: Option<String>,
    client_name: Option<String>,
    sponsor: Option<String>,
    director: Option<String>,
    roles_responsibilities: Option<String>,
    content: String,
    file_name: String,
    pdf_content: Vec<u8>,
    checksum: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<DocumentRow> for PersistedDocument {
    type Error = PersistenceError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let id = DocumentId::from_raw(row.id).map_err(|e| PersistenceError::CorruptRecord {
            id: row.id,
            reason: e.to_string(),
        })?;

        Ok(PersistedDocument {
            id,
            metadata: DocumentRequest {
                project_name: row.project_name,
                project_id: row.project_id,
                elaboration_date: row.elaboration_date,
                company_name: row.company_name,
                client_name: row.client_name,
                sponsor: row.sponsor,
                director: row.director,
                roles_responsibilities: row.roles_responsibilities,
            },
            content: RenderedSource::new(row.content),
            file_name: ArtifactFileName::from_stored(row.file_name),
            pdf_content: row.pdf_content,
            checksum: row.checksum,
            created_at: Timestamp::from(row.created_at),
            updated_at: Timestamp::from(row.updated_at),
        })
    }
}

fn database_error(e: sqlx::Error) -> PersistenceError {
    PersistenceError::database(e.to_string())
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: NewDocument) -> Result<PersistedDocument, PersistenceError> {
        let now = Timestamp::now();
        let meta = &document.metadata;

        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            r#"
            INSERT INTO documents (
                project_name, project_id, elaboration_date, company_name, client_name,
                sponsor, director, roles_responsibilities,
                content, file_name, pdf_content, checksum, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8,
                $9, $10, $11, $12, $13, $13
            )
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(meta.project_name.as_deref())
        .bind(meta.project_id.as_deref())
        .bind(meta.elaboration_date.as_deref())
        .bind(meta.company_name.as_deref())
        .bind(meta.client_name.as_deref())
        .bind(meta.sponsor.as_deref())
        .bind(meta.director.as_deref())
        .bind(meta.roles_responsibilities.as_deref())
        .bind(document.content.as_str())
        .bind(document.file_name.as_str())
        .bind(document.pdf_content.as_slice())
        .bind(document.checksum.as_str())
        .bind(now.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let saved = PersistedDocument::try_from(row)?;
        tracing::info!(document_id = %saved.id, file = %saved.file_name, "Document saved");
        Ok(saved)
    }

    async fn replace(
        &self,
        id: DocumentId,
        document: NewDocument,
    ) -> Result<Option<PersistedDocument>, PersistenceError> {
        let meta = &document.metadata;

        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            r#"
            UPDATE documents
            SET
                project_name = $1,
                project_id = $2,
                elaboration_date = $3,
                company_name = $4,
                client_name = $5,
                sponsor = $6,
                director = $7,
                roles_responsibilities = $8,
                content = $9,
                file_name = $10,
                pdf_content = $11,
                checksum = $12,
                updated_at = $13
            WHERE id = $14
            RETURNING {}
            "#,
            DOCUMENT_COLUMNS
        ))
        .bind(meta.project_name.as_deref())
        .bind(meta.project_id.as_deref())
        .bind(meta.elaboration_date.as_deref())
        .bind(meta.company_name.as_deref())
        .bind(meta.client_name.as_deref())
        .bind(meta.sponsor.as_deref())
        .bind(meta.director.as_deref())
        .bind(meta.roles_responsibilities.as_deref())
        .bind(document.content.as_str())
        .bind(document.file_name.as_str())
        .bind(document.pdf_content.as_slice())
        .bind(document.checksum.as_str())
        .bind(Timestamp::now().as_datetime())
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(PersistedDocument::try_from).transpose()
    }

    async fn find_by_id(
        &self,
        id: DocumentId,
    ) -> Result<Option<PersistedDocument>, PersistenceError> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "SELECT {} FROM documents WHERE id = $1",
            DOCUMENT_COLUMNS
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(PersistedDocument::try_from).transpose()
    }
}
