//! Document category model and DTOs.

use hdms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `document_categories` table.
///
/// Categories form a shallow tree via `parent_id` (e.g. "leave forms"
/// under "internal forms").
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category_type: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentCategory {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category_type: String,
    pub parent_id: Option<DbId>,
}
