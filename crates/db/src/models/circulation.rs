//! Circulation document models and DTOs.

use hdms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `circulation_documents` table.
///
/// `current_step` indexes into the referenced workflow's step list;
/// 0 means no step has acted yet. Circulation documents are never
/// deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CirculationDocument {
    pub id: DbId,
    pub title: String,
    pub document_number: String,
    pub content: Option<String>,
    pub status: String,
    pub current_step: i32,
    pub workflow_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub assigned_to: Option<DbId>,
    pub comments: serde_json::Value,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a circulation document. Status and step are forced to
/// `pending` / 0 by the handler regardless of caller input.
#[derive(Debug, Clone)]
pub struct CreateCirculationDocument {
    pub title: String,
    pub document_number: String,
    pub content: Option<String>,
    pub status: String,
    pub current_step: i32,
    pub workflow_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub assigned_to: Option<DbId>,
    pub comments: serde_json::Value,
    pub tags: Vec<String>,
}

/// Request body for the status transition endpoint.
///
/// `status` names the intended action (`approved` / `in_progress` for
/// approval, `rejected` for rejection); the server computes the values it
/// actually persists. Both `status` and `step` are required by the wire
/// contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
    pub step: Option<i32>,
    pub assigned_to: Option<DbId>,
    pub comment: Option<String>,
}
