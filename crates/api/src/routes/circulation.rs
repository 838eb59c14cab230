//! Route definitions for the `/circulation-documents` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::circulation;
use crate::state::AppState;

/// Routes mounted at `/circulation-documents`.
///
/// ```text
/// GET  /                 -> list_circulation_documents (?userId=)
/// POST /                 -> create_circulation_document (multipart)
/// GET  /{id}             -> get_circulation_document
/// PUT  /{id}/status      -> update_circulation_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(circulation::list_circulation_documents)
                .post(circulation::create_circulation_document),
        )
        .route("/{id}", get(circulation::get_circulation_document))
        .route("/{id}/status", put(circulation::update_circulation_status))
}
