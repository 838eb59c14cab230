//! Activity log models and DTOs.
//!
//! Activity logs are append-only; there is no update or delete path.

use hdms_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A single activity log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub resource_type: String,
    pub resource_id: DbId,
    pub details: Option<serde_json::Value>,
    pub timestamp: Timestamp,
}

/// DTO for appending an activity log entry.
#[derive(Debug, Clone)]
pub struct CreateActivityLog {
    pub user_id: DbId,
    pub action: String,
    pub resource_type: String,
    pub resource_id: DbId,
    pub details: Option<serde_json::Value>,
}

/// Actor info joined onto a log entry for dashboard display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityActor {
    pub id: DbId,
    pub display_name: String,
    pub department: String,
    pub profile_image: Option<String>,
}

/// A log entry enriched with its actor, as returned by the list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogWithUser {
    #[serde(flatten)]
    pub log: ActivityLog,
    pub user: Option<ActivityActor>,
}

/// Flat row shape for the log-with-actor join query.
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLogUserRow {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub resource_type: String,
    pub resource_id: DbId,
    pub details: Option<serde_json::Value>,
    pub timestamp: Timestamp,
    pub display_name: Option<String>,
    pub department: Option<String>,
    pub profile_image: Option<String>,
}

impl From<ActivityLogUserRow> for ActivityLogWithUser {
    fn from(row: ActivityLogUserRow) -> Self {
        let user = row.display_name.map(|display_name| ActivityActor {
            id: row.user_id,
            display_name,
            department: row.department.unwrap_or_default(),
            profile_image: row.profile_image,
        });
        ActivityLogWithUser {
            log: ActivityLog {
                id: row.id,
                user_id: row.user_id,
                action: row.action,
                resource_type: row.resource_type,
                resource_id: row.resource_id,
                details: row.details,
                timestamp: row.timestamp,
            },
            user,
        }
    }
}
