//! Multipart form collection and on-disk upload storage.
//!
//! Every upload endpoint accepts a multipart form with text fields plus an
//! optional `file` part. The file is validated (extension allow-list, size
//! cap) and written under the configured upload root before the handler
//! sees it; handlers that then refuse the request (e.g. quota) must call
//! [`discard`] to remove the orphaned file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use hdms_core::error::CoreError;
use hdms_core::types::DbId;
use hdms_core::uploads::{validate_extension, UploadKind, MAX_UPLOAD_BYTES};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A file part persisted to disk during form collection.
#[derive(Debug)]
pub struct SavedUpload {
    /// Client-supplied file name.
    pub original_name: String,
    /// Lowercase extension without the dot (doubles as the file type).
    pub file_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Path recorded in the database (e.g. `/uploads/storage/file-....pdf`).
    pub relative_path: String,
    /// Absolute location on disk, for cleanup.
    pub disk_path: PathBuf,
}

/// A collected multipart form: text fields plus at most one saved file.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    pub file: Option<SavedUpload>,
}

impl UploadForm {
    /// Look up a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str).filter(|s| !s.is_empty())
    }

    /// Look up a required text field, rejecting the request when absent.
    pub fn require(&self, name: &str) -> AppResult<&str> {
        self.text(name)
            .ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
    }

    /// Parse an optional numeric id field.
    pub fn id(&self, name: &str) -> AppResult<Option<DbId>> {
        match self.text(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<DbId>()
                .map(Some)
                .map_err(|_| AppError::BadRequest(format!("{name} must be a numeric id"))),
        }
    }

    /// Parse an optional field holding a JSON array of strings
    /// (e.g. `tags=["leave","urgent"]`). Missing fields yield an empty list.
    pub fn string_list(&self, name: &str) -> AppResult<Vec<String>> {
        match self.text(name) {
            None => Ok(vec![]),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|_| AppError::BadRequest(format!("{name} must be a JSON string array"))),
        }
    }

    /// Parse an optional field holding arbitrary JSON, defaulting to `[]`.
    pub fn json_value(&self, name: &str) -> AppResult<serde_json::Value> {
        match self.text(name) {
            None => Ok(serde_json::json!([])),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|_| AppError::BadRequest(format!("{name} must be valid JSON"))),
        }
    }

    /// True when the form flags itself as a folder creation (`isFolder=true`).
    pub fn is_folder(&self) -> bool {
        self.text("isFolder") == Some("true")
    }
}

/// Drain a multipart request, saving the `file` part (if any) under
/// `{upload_dir}/{kind.subdir()}` with a unique generated name.
pub async fn collect(
    mut multipart: Multipart,
    kind: UploadKind,
    upload_dir: &Path,
) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" && field.file_name().is_some() {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let file_type = validate_extension(&original_name)?;

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

            if data.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "File exceeds the maximum upload size of {MAX_UPLOAD_BYTES} bytes"
                ))));
            }

            let stored_name = format!("file-{}.{file_type}", Uuid::new_v4());
            let dir = upload_dir.join(kind.subdir());
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

            let disk_path = dir.join(&stored_name);
            tokio::fs::write(&disk_path, &data)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

            form.file = Some(SavedUpload {
                original_name,
                file_type,
                size: data.len() as i64,
                relative_path: format!("/uploads/{}/{stored_name}", kind.subdir()),
                disk_path,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Malformed field '{name}': {e}")))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Best-effort removal of a saved upload whose request was refused.
pub async fn discard(file: &SavedUpload) {
    if let Err(e) = tokio::fs::remove_file(&file.disk_path).await {
        tracing::warn!(path = %file.disk_path.display(), error = %e, "Failed to remove refused upload");
    }
}
