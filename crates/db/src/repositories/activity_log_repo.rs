//! Repository for the `activity_logs` table.
//!
//! Insert and read only; the table is append-only by design of the
//! schema (no update/delete methods exist).

use sqlx::PgPool;

use crate::models::activity_log::{
    ActivityLog, ActivityLogUserRow, ActivityLogWithUser, CreateActivityLog,
};

const COLUMNS: &str = "id, user_id, action, resource_type, resource_id, details, timestamp";

/// Default number of entries returned by the recent-activity listing.
const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Upper bound on the recent-activity listing.
const MAX_RECENT_LIMIT: i64 = 100;

/// Provides append and query operations for the activity trail.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one activity log entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action, resource_type, resource_id, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.resource_type)
            .bind(input.resource_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// List the most recent entries with actor info joined on, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<ActivityLogWithUser>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, MAX_RECENT_LIMIT);

        let rows = sqlx::query_as::<_, ActivityLogUserRow>(
            "SELECT
                l.id, l.user_id, l.action, l.resource_type, l.resource_id,
                l.details, l.timestamp,
                u.display_name, u.department, u.profile_image
             FROM activity_logs l
             LEFT JOIN users u ON u.id = l.user_id
             ORDER BY l.timestamp DESC, l.id DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(ActivityLogWithUser::from).collect())
    }
}
