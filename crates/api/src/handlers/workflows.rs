//! Handlers for the `/workflows` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hdms_core::activity::{action_types, resource_types};
use hdms_core::circulation::{parse_steps, validate_steps};
use hdms_core::types::DbId;
use hdms_db::models::activity_log::CreateActivityLog;
use hdms_db::models::workflow::{CreateWorkflow, Workflow};
use hdms_db::repositories::{ActivityLogRepo, WorkflowRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /workflows`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowRequest {
    pub name: String,
    pub description: Option<String>,
    pub steps: serde_json::Value,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_locked: bool,
}

/// GET /api/workflows
pub async fn list_workflows(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Workflow>>> {
    let workflows = WorkflowRepo::list_all(&state.pool).await?;
    Ok(Json(workflows))
}

/// POST /api/workflows
///
/// Create a workflow definition. The step list must be a well-formed
/// array of `{order, role, description}` entries with known roles.
pub async fn create_workflow(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWorkflowRequest>,
) -> AppResult<impl IntoResponse> {
    let steps = parse_steps(&input.steps)?;
    validate_steps(&steps)?;

    let create = CreateWorkflow {
        name: input.name,
        description: input.description,
        steps: input.steps,
        is_default: input.is_default,
        is_locked: input.is_locked,
        created_by: Some(auth.user_id),
    };
    let workflow = WorkflowRepo::create(&state.pool, &create).await?;

    log_workflow_created(&state, auth.user_id, &workflow).await?;

    tracing::info!(
        user_id = auth.user_id,
        workflow_id = workflow.id,
        steps = steps.len(),
        "Workflow created"
    );

    Ok((StatusCode::CREATED, Json(workflow)))
}

async fn log_workflow_created(
    state: &AppState,
    user_id: DbId,
    workflow: &Workflow,
) -> AppResult<()> {
    let log = CreateActivityLog {
        user_id,
        action: action_types::CREATE.to_string(),
        resource_type: resource_types::WORKFLOW.to_string(),
        resource_id: workflow.id,
        details: Some(serde_json::json!({ "name": workflow.name })),
    };
    ActivityLogRepo::create(&state.pool, &log).await?;
    Ok(())
}
