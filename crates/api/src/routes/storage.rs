//! Route definitions for personal storage.
//!
//! Storage spans two top-level paths (`/storage-files` and
//! `/storage-usage`), so this router is merged rather than nested.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::storage;
use crate::state::AppState;

/// Storage routes, merged at the API root.
///
/// ```text
/// GET    /storage-files                 -> list_storage_files (?parentId=)
/// POST   /storage-files                 -> create_storage_file (multipart)
/// DELETE /storage-files/{id}            -> delete_storage_file
/// POST   /storage-files/{id}/restore    -> restore_storage_file
/// GET    /storage-usage/{user_id}       -> get_storage_usage
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/storage-files",
            get(storage::list_storage_files).post(storage::create_storage_file),
        )
        .route("/storage-files/{id}", delete(storage::delete_storage_file))
        .route(
            "/storage-files/{id}/restore",
            post(storage::restore_storage_file),
        )
        .route("/storage-usage/{user_id}", get(storage::get_storage_usage))
}
