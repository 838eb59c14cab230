//! Route definitions for the `/activity-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::activity;
use crate::state::AppState;

/// Routes mounted at `/activity-logs`.
///
/// ```text
/// GET /  -> list_activity_logs (?limit=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(activity::list_activity_logs))
}
