//! HTTP-level integration tests for workflows and circulation documents.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, post_json, post_multipart, put_json, register_user};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a workflow with `n` manager-role steps, returning its id.
async fn create_workflow(app: Router, cookie: &str, n: usize) -> i64 {
    let steps: Vec<_> = (1..=n)
        .map(|order| {
            serde_json::json!({
                "order": order,
                "role": "manager",
                "description": format!("approval step {order}")
            })
        })
        .collect();
    let body = serde_json::json!({
        "name": format!("{n}-step approval"),
        "description": "test workflow",
        "steps": steps,
    });
    let response = post_json(app, "/api/workflows", body, Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a circulation document via multipart (no file), returning its id.
async fn create_document(
    app: Router,
    cookie: &str,
    workflow_id: i64,
    assigned_to: i64,
) -> i64 {
    let workflow_id = workflow_id.to_string();
    let assigned_to = assigned_to.to_string();
    let fields = [
        ("title", "Annual leave request"),
        ("documentNumber", "MEMO-2026-0042"),
        ("content", "Requesting five days of leave."),
        ("workflowId", workflow_id.as_str()),
        ("assignedTo", assigned_to.as_str()),
        ("tags", r#"["leave"]"#),
    ];
    let response =
        post_multipart(app, "/api/circulation-documents", &fields, None, Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["currentStep"], 0);
    json["id"].as_i64().unwrap()
}

fn approve_body() -> serde_json::Value {
    serde_json::json!({ "status": "approved", "step": 1 })
}

// ---------------------------------------------------------------------------
// Workflow creation
// ---------------------------------------------------------------------------

/// Workflows validate their step shape before persisting.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_workflow_step_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, cookie) = register_user(app.clone(), "creator", "staff").await;

    let bad_role = serde_json::json!({
        "name": "broken",
        "steps": [{ "order": 1, "role": "director", "description": "nope" }],
    });
    let response = post_json(app.clone(), "/api/workflows", bad_role, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let empty_steps = serde_json::json!({ "name": "empty", "steps": [] });
    let response = post_json(app.clone(), "/api/workflows", empty_steps, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    create_workflow(app.clone(), &cookie, 2).await;
    let response = get(app, "/api/workflows", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// A two-step workflow: approving twice finalizes the document.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_twice_finalizes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_creator_id, creator_cookie) = register_user(app.clone(), "creator", "staff").await;
    let (manager_id, manager_cookie) = register_user(app.clone(), "manager", "manager").await;

    let workflow_id = create_workflow(app.clone(), &creator_cookie, 2).await;
    let doc_id = create_document(app.clone(), &creator_cookie, workflow_id, manager_id).await;

    // First approval advances to step 1, still in progress.
    let response = put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        approve_body(),
        Some(&manager_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["currentStep"], 1);
    // No assignee named: falls back to the fixed placeholder (user 2).
    assert_eq!(json["assignedTo"], manager_id);

    // Second approval reaches the end of the step list.
    let response = put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        serde_json::json!({ "status": "approved", "step": 2 }),
        Some(&manager_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "approved");
    assert_eq!(json["currentStep"], 2);
    assert!(json["assignedTo"].is_null(), "terminal approval clears the assignee");
}

/// Rejection is terminal and resets the step to 0.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reject_resets_step(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, creator_cookie) = register_user(app.clone(), "creator", "staff").await;
    let (manager_id, manager_cookie) = register_user(app.clone(), "manager", "manager").await;

    let workflow_id = create_workflow(app.clone(), &creator_cookie, 3).await;
    let doc_id = create_document(app.clone(), &creator_cookie, workflow_id, manager_id).await;

    // Advance one step first.
    put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        approve_body(),
        Some(&manager_cookie),
    )
    .await;

    let response = put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        serde_json::json!({ "status": "rejected", "step": 0, "comment": "budget missing" }),
        Some(&manager_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "rejected");
    assert_eq!(json["currentStep"], 0);
    assert!(json["assignedTo"].is_null());
}

/// Only the current assignee or an admin may transition a document.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_transition_authorization(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, creator_cookie) = register_user(app.clone(), "creator", "staff").await;
    let (manager_id, _) = register_user(app.clone(), "manager", "manager").await;
    let (_, bystander_cookie) = register_user(app.clone(), "bystander", "staff").await;
    let (_, admin_cookie) = register_user(app.clone(), "boss", "admin").await;

    let workflow_id = create_workflow(app.clone(), &creator_cookie, 2).await;
    let doc_id = create_document(app.clone(), &creator_cookie, workflow_id, manager_id).await;

    // A non-assignee, non-admin actor is refused.
    let response = put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        approve_body(),
        Some(&bystander_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An admin may act even when not the assignee.
    let response = put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        approve_body(),
        Some(&admin_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Bad transition requests are rejected without mutation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_transition_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, creator_cookie) = register_user(app.clone(), "creator", "staff").await;
    let (manager_id, manager_cookie) = register_user(app.clone(), "manager", "manager").await;

    let workflow_id = create_workflow(app.clone(), &creator_cookie, 2).await;
    let doc_id = create_document(app.clone(), &creator_cookie, workflow_id, manager_id).await;

    // Missing fields.
    let response = put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        serde_json::json!({ "comment": "no status or step" }),
        Some(&manager_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // `pending` is not a valid target.
    let response = put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        serde_json::json!({ "status": "pending", "step": 1 }),
        Some(&manager_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown document id.
    let response = put_json(
        app.clone(),
        "/api/circulation-documents/9999/status",
        approve_body(),
        Some(&manager_cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The document is untouched by any of the failed calls.
    let response = get(
        app,
        &format!("/api/circulation-documents/{doc_id}"),
        Some(&manager_cookie),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "pending");
    assert_eq!(json["currentStep"], 0);
}

/// Every transition appends an activity log entry naming the resulting
/// status as the action.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_transition_appends_activity_log(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, creator_cookie) = register_user(app.clone(), "creator", "staff").await;
    let (manager_id, manager_cookie) = register_user(app.clone(), "manager", "manager").await;

    let workflow_id = create_workflow(app.clone(), &creator_cookie, 2).await;
    let doc_id = create_document(app.clone(), &creator_cookie, workflow_id, manager_id).await;

    put_json(
        app.clone(),
        &format!("/api/circulation-documents/{doc_id}/status"),
        serde_json::json!({ "status": "approved", "step": 1, "comment": "looks fine" }),
        Some(&manager_cookie),
    )
    .await;

    let response = get(app, "/api/activity-logs?limit=10", Some(&manager_cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let logs = body_json(response).await;
    let logs = logs.as_array().unwrap();

    // Newest first: the transition entry precedes the creation entry.
    assert_eq!(logs[0]["action"], "in_progress");
    assert_eq!(logs[0]["resourceType"], "circulation");
    assert_eq!(logs[0]["resourceId"], doc_id);
    assert_eq!(logs[0]["details"]["comment"], "looks fine");
    assert_eq!(logs[0]["user"]["displayName"], "manager");
    assert!(logs.iter().any(|l| l["action"] == "create"));
}

/// The per-user listing filter covers both created and assigned documents.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_filter_by_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (creator_id, creator_cookie) = register_user(app.clone(), "creator", "staff").await;
    let (manager_id, _) = register_user(app.clone(), "manager", "manager").await;
    let (bystander_id, bystander_cookie) = register_user(app.clone(), "bystander", "staff").await;

    let workflow_id = create_workflow(app.clone(), &creator_cookie, 2).await;
    create_document(app.clone(), &creator_cookie, workflow_id, manager_id).await;

    for (user_id, expected) in [(creator_id, 1), (manager_id, 1), (bystander_id, 0)] {
        let response = get(
            app.clone(),
            &format!("/api/circulation-documents?userId={user_id}"),
            Some(&bystander_cookie),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await.as_array().unwrap().len(), expected);
    }
}
