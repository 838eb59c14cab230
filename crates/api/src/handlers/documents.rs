//! Handlers for the download-center `/documents` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use hdms_core::activity::{action_types, resource_types};
use hdms_core::error::CoreError;
use hdms_core::types::DbId;
use hdms_core::uploads::UploadKind;
use hdms_db::models::activity_log::CreateActivityLog;
use hdms_db::models::document::{CreateDocument, CreateDownloadHistory, Document};
use hdms_db::repositories::{ActivityLogRepo, CategoryRepo, DocumentRepo, DownloadHistoryRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads;

/// Query parameters for the document listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    pub category_id: Option<DbId>,
}

/// Response for the download endpoint. The file itself is served by the
/// static uploads route; this records the download and confirms it.
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub message: String,
    pub document: Document,
}

/// GET /api/documents[?categoryId=]
pub async fn list_documents(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListDocumentsQuery>,
) -> AppResult<Json<Vec<Document>>> {
    let documents = match params.category_id {
        Some(category_id) => DocumentRepo::list_by_category(&state.pool, category_id).await?,
        None => DocumentRepo::list(&state.pool).await?,
    };
    Ok(Json(documents))
}

/// GET /api/documents/{id}
pub async fn get_document(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let document = ensure_document_exists(&state.pool, id).await?;
    Ok(Json(document))
}

/// POST /api/documents
///
/// Multipart upload of a new download-center document. Requires a `file`
/// part; `title` is the only required text field.
pub async fn create_document(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = uploads::collect(multipart, UploadKind::Document, &state.config.upload_dir).await?;

    let Some(file) = form.file.as_ref() else {
        return Err(AppError::BadRequest("No file uploaded".into()));
    };

    let title = form.require("title")?.to_string();
    let category_id = form.id("categoryId")?;

    if let Some(category_id) = category_id {
        if CategoryRepo::find_by_id(&state.pool, category_id).await?.is_none() {
            uploads::discard(file).await;
            return Err(AppError::Core(CoreError::NotFound {
                entity: "DocumentCategory",
                id: category_id,
            }));
        }
    }

    let create = CreateDocument {
        title,
        description: form.text("description").map(str::to_string),
        file_name: file.original_name.clone(),
        file_type: file.file_type.clone(),
        file_path: file.relative_path.clone(),
        file_size: file.size,
        category_id,
        uploaded_by: Some(auth.user_id),
        tags: form.string_list("tags")?,
        access_roles: form.string_list("accessRoles")?,
        access_departments: form.string_list("accessDepartments")?,
    };
    let document = DocumentRepo::create(&state.pool, &create).await?;

    let log = CreateActivityLog {
        user_id: auth.user_id,
        action: action_types::UPLOAD.to_string(),
        resource_type: resource_types::DOCUMENT.to_string(),
        resource_id: document.id,
        details: Some(serde_json::json!({
            "title": document.title,
            "fileName": document.file_name,
        })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;

    tracing::info!(
        user_id = auth.user_id,
        document_id = document.id,
        file_size = document.file_size,
        "Document uploaded"
    );

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/documents/{id}/download
///
/// Record a download: bump the counter, append a history row and an
/// activity log entry.
pub async fn download_document(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<Json<DownloadResponse>> {
    ensure_document_exists(&state.pool, id).await?;

    let document = DocumentRepo::increment_download_count(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;

    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let history = CreateDownloadHistory {
        document_id: id,
        user_id: auth.user_id,
        ip_address,
    };
    DownloadHistoryRepo::create(&state.pool, &history).await?;

    let log = CreateActivityLog {
        user_id: auth.user_id,
        action: action_types::DOWNLOAD.to_string(),
        resource_type: resource_types::DOCUMENT.to_string(),
        resource_id: id,
        details: Some(serde_json::json!({
            "title": document.title,
            "fileName": document.file_name,
        })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;

    tracing::info!(user_id = auth.user_id, document_id = id, "Document download recorded");

    Ok(Json(DownloadResponse {
        success: true,
        message: "Document download recorded".to_string(),
        document,
    }))
}

/// Verify that a document exists, returning the full row.
async fn ensure_document_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Document> {
    DocumentRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))
}
