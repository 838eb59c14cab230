pub mod activity;
pub mod admin;
pub mod auth;
pub mod categories;
pub mod circulation;
pub mod documents;
pub mod health;
pub mod storage;
pub mod users;
pub mod workflows;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/logout                            logout (requires auth)
/// /auth/me                                current user
///
/// /users                                  list users
/// /users/{id}                             get user
///
/// /document-categories                    list, create
///
/// /documents                              list (?categoryId=), create (multipart)
/// /documents/{id}                         get
/// /documents/{id}/download                record a download
///
/// /workflows                              list, create
///
/// /circulation-documents                  list (?userId=), create (multipart)
/// /circulation-documents/{id}             get
/// /circulation-documents/{id}/status      approve/reject transition (PUT)
///
/// /storage-files                          list (?parentId=), create (multipart)
/// /storage-files/{id}                     soft-delete (DELETE)
/// /storage-files/{id}/restore             restore (POST)
/// /storage-usage/{user_id}                usage figures
///
/// /activity-logs                          recent activity (?limit=)
///
/// /admin/users                            list, create (admin only)
/// /admin/users/{id}                       update (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/document-categories", categories::router())
        .nest("/documents", documents::router())
        .nest("/workflows", workflows::router())
        .nest("/circulation-documents", circulation::router())
        .merge(storage::router())
        .nest("/activity-logs", activity::router())
        .nest("/admin", admin::router())
}
