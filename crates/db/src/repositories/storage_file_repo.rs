//! Repository for the `storage_files` table.

use hdms_core::types::DbId;
use sqlx::PgPool;

use crate::models::storage_file::{CreateStorageFile, StorageFile};

const COLUMNS: &str = "id, name, description, file_path, file_type, file_size, owner_id, \
    parent_id, is_folder, is_deleted, deleted_at, access_level, shared_with, \
    upload_date, last_modified";

/// Provides CRUD, soft-delete, and usage operations for personal storage.
pub struct StorageFileRepo;

impl StorageFileRepo {
    /// Insert a new file or folder, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStorageFile,
    ) -> Result<StorageFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_files
                (name, description, file_path, file_type, file_size, owner_id,
                 parent_id, is_folder, access_level, shared_with)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageFile>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.file_path)
            .bind(&input.file_type)
            .bind(input.file_size)
            .bind(input.owner_id)
            .bind(input.parent_id)
            .bind(input.is_folder)
            .bind(&input.access_level)
            .bind(&input.shared_with)
            .fetch_one(pool)
            .await
    }

    /// Find a storage file by its ID, including soft-deleted rows.
    ///
    /// Restore needs to see deleted rows, so no `is_deleted` filter here;
    /// listing applies it instead.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StorageFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storage_files WHERE id = $1");
        sqlx::query_as::<_, StorageFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's non-deleted entries under a parent folder.
    ///
    /// `parent_id = None` lists the root level (rows with no parent).
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
        parent_id: Option<DbId>,
    ) -> Result<Vec<StorageFile>, sqlx::Error> {
        let query = match parent_id {
            Some(_) => format!(
                "SELECT {COLUMNS} FROM storage_files
                 WHERE owner_id = $1 AND is_deleted = FALSE AND parent_id = $2
                 ORDER BY is_folder DESC, name ASC"
            ),
            None => format!(
                "SELECT {COLUMNS} FROM storage_files
                 WHERE owner_id = $1 AND is_deleted = FALSE AND parent_id IS NULL
                 ORDER BY is_folder DESC, name ASC"
            ),
        };

        let mut q = sqlx::query_as::<_, StorageFile>(&query).bind(owner_id);
        if let Some(parent) = parent_id {
            q = q.bind(parent);
        }
        q.fetch_all(pool).await
    }

    /// Soft-delete a file: flip `is_deleted` and stamp `deleted_at`.
    ///
    /// Returns `true` if the row was updated (idempotent: a second call
    /// returns `false`).
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE storage_files
             SET is_deleted = TRUE, deleted_at = NOW(), last_modified = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted file, returning the updated row.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<StorageFile>, sqlx::Error> {
        let query = format!(
            "UPDATE storage_files
             SET is_deleted = FALSE, deleted_at = NULL, last_modified = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total bytes used by an owner's non-deleted, non-folder files.
    pub async fn usage_for_owner(pool: &PgPool, owner_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(file_size), 0)::BIGINT FROM storage_files
             WHERE owner_id = $1 AND is_deleted = FALSE AND is_folder = FALSE",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }
}
