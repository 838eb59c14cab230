//! Handlers for the `/circulation-documents` resource.
//!
//! Circulation documents are internal memos routed through an approval
//! workflow. The status endpoint implements the transition contract:
//! approvals advance one step (finalizing past the last step), rejections
//! are terminal and reset the step, and every transition appends one
//! activity log entry.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hdms_core::activity::{action_types, resource_types};
use hdms_core::circulation::{
    next_transition, parse_steps, TransitionAction, STATUS_PENDING,
};
use hdms_core::error::CoreError;
use hdms_core::roles::ROLE_ADMIN;
use hdms_core::types::DbId;
use hdms_core::uploads::UploadKind;
use hdms_db::models::activity_log::CreateActivityLog;
use hdms_db::models::circulation::{
    CirculationDocument, CreateCirculationDocument, StatusUpdateRequest,
};
use hdms_db::repositories::{ActivityLogRepo, CirculationRepo, WorkflowRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads;

/// Query parameters for the circulation listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCirculationQuery {
    /// Restrict to documents the user created or is assigned to.
    pub user_id: Option<DbId>,
}

/// GET /api/circulation-documents[?userId=]
pub async fn list_circulation_documents(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListCirculationQuery>,
) -> AppResult<Json<Vec<CirculationDocument>>> {
    let documents = match params.user_id {
        Some(user_id) => CirculationRepo::list_for_user(&state.pool, user_id).await?,
        None => CirculationRepo::list_all(&state.pool).await?,
    };
    Ok(Json(documents))
}

/// GET /api/circulation-documents/{id}
pub async fn get_circulation_document(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CirculationDocument>> {
    let document = ensure_circulation_exists(&state.pool, id).await?;
    Ok(Json(document))
}

/// POST /api/circulation-documents
///
/// Multipart creation of a circulation document with an optional `file`
/// part. Status and step are forced to `pending` / 0; the creator is the
/// authenticated user.
pub async fn create_circulation_document(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form =
        uploads::collect(multipart, UploadKind::Circulation, &state.config.upload_dir).await?;

    let title = form.require("title")?.to_string();
    let document_number = form.require("documentNumber")?.to_string();
    let workflow_id = form.id("workflowId")?;

    // A named workflow must exist. The assignee is deliberately NOT
    // checked against the user table here; an invalid id surfaces as a
    // foreign-key failure on the write.
    if let Some(workflow_id) = workflow_id {
        if WorkflowRepo::find_by_id(&state.pool, workflow_id).await?.is_none() {
            if let Some(file) = form.file.as_ref() {
                uploads::discard(file).await;
            }
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Workflow",
                id: workflow_id,
            }));
        }
    }

    let create = CreateCirculationDocument {
        title,
        document_number,
        content: form.text("content").map(str::to_string),
        status: STATUS_PENDING.to_string(),
        current_step: 0,
        workflow_id,
        created_by: Some(auth.user_id),
        file_path: form.file.as_ref().map(|f| f.relative_path.clone()),
        file_type: form.file.as_ref().map(|f| f.file_type.clone()),
        assigned_to: form.id("assignedTo")?,
        comments: form.json_value("comments")?,
        tags: form.string_list("tags")?,
    };
    let document = CirculationRepo::create(&state.pool, &create).await?;

    let log = CreateActivityLog {
        user_id: auth.user_id,
        action: action_types::CREATE.to_string(),
        resource_type: resource_types::CIRCULATION.to_string(),
        resource_id: document.id,
        details: Some(serde_json::json!({
            "title": document.title,
            "documentNumber": document.document_number,
        })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;

    tracing::info!(
        user_id = auth.user_id,
        document_id = document.id,
        workflow_id = ?document.workflow_id,
        "Circulation document created"
    );

    Ok((StatusCode::CREATED, Json(document)))
}

/// PUT /api/circulation-documents/{id}/status
///
/// Apply an approve/reject transition. Only the current assignee or an
/// admin may act. The request's `status` field names the intended action;
/// the persisted status, step, and assignee are computed server-side.
///
/// There is no lock or version check between the read and the write, so
/// two simultaneous transitions can both succeed (last write wins).
pub async fn update_circulation_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StatusUpdateRequest>,
) -> AppResult<Json<CirculationDocument>> {
    let (Some(status), Some(_step)) = (input.status.as_deref(), input.step) else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };

    let document = ensure_circulation_exists(&state.pool, id).await?;

    if auth.role != ROLE_ADMIN && document.assigned_to != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the current assignee or an admin can act on this document".into(),
        )));
    }

    let action = TransitionAction::from_status(status)?;
    let step_count = workflow_step_count(&state, document.workflow_id).await?;

    let transition = next_transition(
        action,
        document.current_step,
        step_count,
        input.assigned_to,
    );

    let updated = CirculationRepo::update_status(
        &state.pool,
        id,
        transition.status,
        transition.step,
        transition.assigned_to,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "CirculationDocument",
        id,
    }))?;

    let log = CreateActivityLog {
        user_id: auth.user_id,
        action: updated.status.clone(),
        resource_type: resource_types::CIRCULATION.to_string(),
        resource_id: id,
        details: Some(serde_json::json!({
            "title": document.title,
            "documentNumber": document.document_number,
            "comment": input.comment,
        })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;

    tracing::info!(
        user_id = auth.user_id,
        document_id = id,
        status = %updated.status,
        current_step = updated.current_step,
        "Circulation document transitioned"
    );

    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a circulation document exists, returning the full row.
async fn ensure_circulation_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<CirculationDocument> {
    CirculationRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CirculationDocument",
            id,
        }))
}

/// Resolve the number of steps in a document's workflow.
///
/// Documents without a workflow advance against an empty step list.
async fn workflow_step_count(state: &AppState, workflow_id: Option<DbId>) -> AppResult<usize> {
    let Some(workflow_id) = workflow_id else {
        return Ok(0);
    };
    let workflow = WorkflowRepo::find_by_id(&state.pool, workflow_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workflow",
            id: workflow_id,
        }))?;
    Ok(parse_steps(&workflow.steps)?.len())
}
