//! Handlers for the `/document-categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hdms_core::error::CoreError;
use hdms_db::models::category::{CreateDocumentCategory, DocumentCategory};
use hdms_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Accepted category kinds.
const VALID_CATEGORY_TYPES: &[&str] = &["internal_form", "external_form", "template"];

/// GET /api/document-categories
pub async fn list_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DocumentCategory>>> {
    let categories = CategoryRepo::list_all(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/document-categories
pub async fn create_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDocumentCategory>,
) -> AppResult<impl IntoResponse> {
    if !VALID_CATEGORY_TYPES.contains(&input.category_type.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid category type '{}'. Must be one of: {}",
            input.category_type,
            VALID_CATEGORY_TYPES.join(", ")
        ))));
    }

    // A parent reference must point at an existing category.
    if let Some(parent_id) = input.parent_id {
        CategoryRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "DocumentCategory",
                id: parent_id,
            }))?;
    }

    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}
