//! Download-center document and download-history models.

use hdms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub file_size: i64,
    pub category_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    pub download_count: i32,
    pub tags: Vec<String>,
    pub access_roles: Vec<String>,
    pub access_departments: Vec<String>,
    pub upload_date: Timestamp,
    pub last_updated: Timestamp,
}

/// DTO for creating a new document record (file already on disk).
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_type: String,
    pub file_path: String,
    pub file_size: i64,
    pub category_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    pub tags: Vec<String>,
    pub access_roles: Vec<String>,
    pub access_departments: Vec<String>,
}

/// A row from the `download_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadHistory {
    pub id: DbId,
    pub document_id: DbId,
    pub user_id: DbId,
    pub ip_address: Option<String>,
    pub download_date: Timestamp,
}

/// DTO for recording a download.
#[derive(Debug, Clone)]
pub struct CreateDownloadHistory {
    pub document_id: DbId,
    pub user_id: DbId,
    pub ip_address: Option<String>,
}
