//! Handlers for the personal `/storage-files` resource and usage endpoint.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hdms_core::activity::{action_types, resource_types};
use hdms_core::error::CoreError;
use hdms_core::storage::{check_quota, usage_percentage, STORAGE_QUOTA_BYTES};
use hdms_core::types::DbId;
use hdms_core::uploads::UploadKind;
use hdms_db::models::activity_log::CreateActivityLog;
use hdms_db::models::storage_file::{CreateStorageFile, StorageFile};
use hdms_db::repositories::{ActivityLogRepo, StorageFileRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads;

/// Accepted access levels for storage entries.
const VALID_ACCESS_LEVELS: &[&str] = &["private", "department", "public"];

/// Query parameters for the storage listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStorageQuery {
    /// Folder to list; omitted lists the root level.
    pub parent_id: Option<DbId>,
}

/// Response for `GET /storage-usage/{userId}`.
#[derive(Debug, Serialize)]
pub struct StorageUsageResponse {
    pub usage: i64,
    pub limit: i64,
    pub percentage: f64,
}

/// Response for the delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// GET /api/storage-files[?parentId=]
///
/// List the authenticated user's non-deleted files under a folder.
pub async fn list_storage_files(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListStorageQuery>,
) -> AppResult<Json<Vec<StorageFile>>> {
    let files = StorageFileRepo::list_for_owner(&state.pool, auth.user_id, params.parent_id).await?;
    Ok(Json(files))
}

/// GET /api/storage-usage/{userId}
pub async fn get_storage_usage(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<StorageUsageResponse>> {
    let usage = StorageFileRepo::usage_for_owner(&state.pool, user_id).await?;
    Ok(Json(StorageUsageResponse {
        usage,
        limit: STORAGE_QUOTA_BYTES,
        percentage: usage_percentage(usage),
    }))
}

/// POST /api/storage-files
///
/// Multipart creation of a file or folder. File uploads are checked
/// against the owner's quota BEFORE the record is persisted; the check
/// and the insert are not atomic, so concurrent uploads can race past
/// the limit.
pub async fn create_storage_file(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = uploads::collect(multipart, UploadKind::Storage, &state.config.upload_dir).await?;

    let access_level = form.text("accessLevel").unwrap_or("private").to_string();
    if !VALID_ACCESS_LEVELS.contains(&access_level.as_str()) {
        if let Some(file) = form.file.as_ref() {
            uploads::discard(file).await;
        }
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid access level '{access_level}'. Must be one of: {}",
            VALID_ACCESS_LEVELS.join(", ")
        ))));
    }

    let parent_id = form.id("parentId")?;
    let shared_with = form.string_list("sharedWith")?;
    let description = form.text("description").map(str::to_string);

    let create = if form.is_folder() {
        // Folders occupy no quota and carry no file.
        let name = form.require("name")?.to_string();
        CreateStorageFile {
            file_path: format!("/storage/{}/{name}", auth.user_id),
            file_type: "folder".to_string(),
            file_size: 0,
            name,
            description,
            owner_id: auth.user_id,
            parent_id,
            is_folder: true,
            access_level,
            shared_with,
        }
    } else if let Some(file) = form.file.as_ref() {
        let usage = StorageFileRepo::usage_for_owner(&state.pool, auth.user_id).await?;
        if let Err(e) = check_quota(usage, file.size) {
            uploads::discard(file).await;
            return Err(e.into());
        }

        CreateStorageFile {
            name: form
                .text("name")
                .unwrap_or(&file.original_name)
                .to_string(),
            description,
            file_path: file.relative_path.clone(),
            file_type: file.file_type.clone(),
            file_size: file.size,
            owner_id: auth.user_id,
            parent_id,
            is_folder: false,
            access_level,
            shared_with,
        }
    } else {
        return Err(AppError::BadRequest(
            "Neither file nor folder information provided".into(),
        ));
    };

    let created = StorageFileRepo::create(&state.pool, &create).await?;

    let log = CreateActivityLog {
        user_id: auth.user_id,
        action: action_types::UPLOAD.to_string(),
        resource_type: resource_types::STORAGE.to_string(),
        resource_id: created.id,
        details: Some(serde_json::json!({
            "name": created.name,
            "isFolder": created.is_folder,
        })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;

    tracing::info!(
        user_id = auth.user_id,
        file_id = created.id,
        is_folder = created.is_folder,
        file_size = created.file_size,
        "Storage entry created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/storage-files/{id}
///
/// Soft-delete a file the authenticated user owns.
pub async fn delete_storage_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let file = ensure_file_owned(&state.pool, id, auth.user_id, "delete").await?;

    let deleted = StorageFileRepo::soft_delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StorageFile",
            id,
        }));
    }

    let log = CreateActivityLog {
        user_id: auth.user_id,
        action: action_types::DELETE.to_string(),
        resource_type: resource_types::STORAGE.to_string(),
        resource_id: id,
        details: Some(serde_json::json!({
            "name": file.name,
            "isFolder": file.is_folder,
        })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;

    tracing::info!(user_id = auth.user_id, file_id = id, "Storage file soft-deleted");

    Ok(Json(DeleteResponse { success: true }))
}

/// POST /api/storage-files/{id}/restore
///
/// Restore a soft-deleted file the authenticated user owns.
pub async fn restore_storage_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<StorageFile>> {
    ensure_file_owned(&state.pool, id, auth.user_id, "restore").await?;

    let restored = StorageFileRepo::restore(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageFile",
            id,
        }))?;

    let log = CreateActivityLog {
        user_id: auth.user_id,
        action: action_types::RESTORE.to_string(),
        resource_type: resource_types::STORAGE.to_string(),
        resource_id: id,
        details: Some(serde_json::json!({
            "name": restored.name,
            "isFolder": restored.is_folder,
        })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;

    tracing::info!(user_id = auth.user_id, file_id = id, "Storage file restored");

    Ok(Json(restored))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a storage file and verify the acting user owns it.
async fn ensure_file_owned(
    pool: &sqlx::PgPool,
    id: DbId,
    user_id: DbId,
    verb: &str,
) -> AppResult<StorageFile> {
    let file = StorageFileRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StorageFile",
            id,
        }))?;

    if file.owner_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "You do not have permission to {verb} this file"
        ))));
    }
    Ok(file)
}
