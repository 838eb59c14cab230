//! Handler for the `/activity-logs` listing.

use axum::extract::{Query, State};
use axum::Json;
use hdms_db::models::activity_log::ActivityLogWithUser;
use hdms_db::repositories::ActivityLogRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for the activity listing.
#[derive(Debug, Deserialize)]
pub struct ListActivityQuery {
    pub limit: Option<i64>,
}

/// GET /api/activity-logs[?limit=]
///
/// Most recent activity entries, newest first, with actor info attached.
pub async fn list_activity_logs(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListActivityQuery>,
) -> AppResult<Json<Vec<ActivityLogWithUser>>> {
    let logs = ActivityLogRepo::list_recent(&state.pool, params.limit).await?;
    Ok(Json(logs))
}
