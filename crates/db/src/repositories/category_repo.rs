//! Repository for the `document_categories` table.

use hdms_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{CreateDocumentCategory, DocumentCategory};

const COLUMNS: &str = "id, name, description, category_type, parent_id, created_at";

/// Provides CRUD operations for document categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDocumentCategory,
    ) -> Result<DocumentCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO document_categories (name, description, category_type, parent_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category_type)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DocumentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM document_categories WHERE id = $1");
        sqlx::query_as::<_, DocumentCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<DocumentCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM document_categories ORDER BY id ASC");
        sqlx::query_as::<_, DocumentCategory>(&query)
            .fetch_all(pool)
            .await
    }
}
