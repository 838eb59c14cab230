//! Repository for the `circulation_documents` table.

use hdms_core::types::DbId;
use sqlx::PgPool;

use crate::models::circulation::{CirculationDocument, CreateCirculationDocument};

const COLUMNS: &str = "id, title, document_number, content, status, current_step, \
    workflow_id, created_by, file_path, file_type, assigned_to, comments, tags, created_at";

/// Provides CRUD operations for circulation documents.
pub struct CirculationRepo;

impl CirculationRepo {
    /// Insert a new circulation document, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCirculationDocument,
    ) -> Result<CirculationDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO circulation_documents
                (title, document_number, content, status, current_step, workflow_id,
                 created_by, file_path, file_type, assigned_to, comments, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CirculationDocument>(&query)
            .bind(&input.title)
            .bind(&input.document_number)
            .bind(&input.content)
            .bind(&input.status)
            .bind(input.current_step)
            .bind(input.workflow_id)
            .bind(input.created_by)
            .bind(&input.file_path)
            .bind(&input.file_type)
            .bind(input.assigned_to)
            .bind(&input.comments)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a circulation document by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CirculationDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM circulation_documents WHERE id = $1");
        sqlx::query_as::<_, CirculationDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all circulation documents, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CirculationDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM circulation_documents ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CirculationDocument>(&query)
            .fetch_all(pool)
            .await
    }

    /// List documents a user either created or is currently assigned to.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CirculationDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM circulation_documents
             WHERE created_by = $1 OR assigned_to = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CirculationDocument>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Persist a computed transition: status, step, and assignee together.
    ///
    /// A plain overwrite with no row lock or version check -- concurrent
    /// transitions against the same document are last-write-wins.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        step: i32,
        assigned_to: Option<DbId>,
    ) -> Result<Option<CirculationDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE circulation_documents
             SET status = $2, current_step = $3, assigned_to = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CirculationDocument>(&query)
            .bind(id)
            .bind(status)
            .bind(step)
            .bind(assigned_to)
            .fetch_optional(pool)
            .await
    }
}
