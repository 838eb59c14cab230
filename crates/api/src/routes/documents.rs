//! Route definitions for the `/documents` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::documents;
use crate::state::AppState;

/// Routes mounted at `/documents`.
///
/// ```text
/// GET  /                 -> list_documents (?categoryId=)
/// POST /                 -> create_document (multipart)
/// GET  /{id}             -> get_document
/// GET  /{id}/download    -> download_document
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(documents::list_documents).post(documents::create_document),
        )
        .route("/{id}", get(documents::get_document))
        .route("/{id}/download", get(documents::download_document))
}
