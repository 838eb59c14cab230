//! Approval workflow models and DTOs.

use hdms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A workflow row from the `workflows` table.
///
/// `steps` holds the ordered JSON array of approval steps; parse it with
/// [`hdms_core::circulation::parse_steps`] when the typed form is needed.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub steps: serde_json::Value,
    pub is_default: bool,
    pub is_locked: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Request body / DTO for creating a workflow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflow {
    pub name: String,
    pub description: Option<String>,
    pub steps: serde_json::Value,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_locked: bool,
    pub created_by: Option<DbId>,
}
