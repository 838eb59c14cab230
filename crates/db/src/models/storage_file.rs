//! Personal storage file/folder model and DTOs.

use hdms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `storage_files` table.
///
/// Folders are rows with `is_folder = true` and a zero size. Deletion is
/// soft: `is_deleted` flips and `deleted_at` is stamped; the row stays.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFile {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub owner_id: DbId,
    pub parent_id: Option<DbId>,
    pub is_folder: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub access_level: String,
    pub shared_with: Vec<String>,
    pub upload_date: Timestamp,
    pub last_modified: Timestamp,
}

/// DTO for creating a storage file or folder.
#[derive(Debug, Clone)]
pub struct CreateStorageFile {
    pub name: String,
    pub description: Option<String>,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    pub owner_id: DbId,
    pub parent_id: Option<DbId>,
    pub is_folder: bool,
    pub access_level: String,
    pub shared_with: Vec<String>,
}
