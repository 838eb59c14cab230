//! Repositories for the `documents` and `download_history` tables.

use hdms_core::types::DbId;
use sqlx::PgPool;

use crate::models::document::{
    CreateDocument, CreateDownloadHistory, Document, DownloadHistory,
};

/// Column list for documents queries.
const DOCUMENT_COLUMNS: &str = "id, title, description, file_name, file_type, file_path, \
    file_size, category_id, uploaded_by, download_count, tags, access_roles, \
    access_departments, upload_date, last_updated";

/// Column list for download_history queries.
const HISTORY_COLUMNS: &str = "id, document_id, user_id, ip_address, download_date";

/// Provides CRUD operations for download-center documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDocument) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents
                (title, description, file_name, file_type, file_path, file_size,
                 category_id, uploaded_by, tags, access_roles, access_departments)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {DOCUMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.file_name)
            .bind(&input.file_type)
            .bind(&input.file_path)
            .bind(input.file_size)
            .bind(input.category_id)
            .bind(input.uploaded_by)
            .bind(&input.tags)
            .bind(&input.access_roles)
            .bind(&input.access_departments)
            .fetch_one(pool)
            .await
    }

    /// Find a document by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all documents, most recently uploaded first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!("SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY upload_date DESC");
        sqlx::query_as::<_, Document>(&query).fetch_all(pool).await
    }

    /// List documents belonging to a category, most recently uploaded first.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query = format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents
             WHERE category_id = $1
             ORDER BY upload_date DESC"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Increment a document's download counter, returning the updated row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn increment_download_count(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET download_count = download_count + 1
             WHERE id = $1
             RETURNING {DOCUMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// Provides insert/query operations for the download audit trail.
pub struct DownloadHistoryRepo;

impl DownloadHistoryRepo {
    /// Record a download, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDownloadHistory,
    ) -> Result<DownloadHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO download_history (document_id, user_id, ip_address)
             VALUES ($1, $2, $3)
             RETURNING {HISTORY_COLUMNS}"
        );
        sqlx::query_as::<_, DownloadHistory>(&query)
            .bind(input.document_id)
            .bind(input.user_id)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// List download records for a document, newest first.
    pub async fn list_for_document(
        pool: &PgPool,
        document_id: DbId,
    ) -> Result<Vec<DownloadHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {HISTORY_COLUMNS} FROM download_history
             WHERE document_id = $1
             ORDER BY download_date DESC"
        );
        sqlx::query_as::<_, DownloadHistory>(&query)
            .bind(document_id)
            .fetch_all(pool)
            .await
    }
}
