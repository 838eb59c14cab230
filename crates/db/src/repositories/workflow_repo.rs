//! Repository for the `workflows` table.

use hdms_core::types::DbId;
use sqlx::PgPool;

use crate::models::workflow::{CreateWorkflow, Workflow};

const COLUMNS: &str =
    "id, name, description, steps, is_default, is_locked, created_by, created_at";

/// Provides CRUD operations for approval workflows.
pub struct WorkflowRepo;

impl WorkflowRepo {
    /// Insert a new workflow, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorkflow) -> Result<Workflow, sqlx::Error> {
        let query = format!(
            "INSERT INTO workflows (name, description, steps, is_default, is_locked, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workflow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.steps)
            .bind(input.is_default)
            .bind(input.is_locked)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a workflow by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflows WHERE id = $1");
        sqlx::query_as::<_, Workflow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all workflows ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Workflow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workflows ORDER BY id ASC");
        sqlx::query_as::<_, Workflow>(&query).fetch_all(pool).await
    }
}
