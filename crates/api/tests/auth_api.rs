//! HTTP-level integration tests for registration, login, sessions, and RBAC.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, register_user, session_cookie_from};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registering returns 201 with the user (sans hash) and a live session.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "somchai",
        "password": "somchai-secret",
        "displayName": "Somchai M.",
        "department": "personnel",
        "role": "manager",
        "email": "somchai@hospital.example",
    });
    let response = post_json(app.clone(), "/api/auth/register", body, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = session_cookie_from(&response);
    let json = body_json(response).await;
    assert_eq!(json["user"]["username"], "somchai");
    assert_eq!(json["user"]["role"], "manager");
    assert!(
        json["user"].get("passwordHash").is_none() && json["user"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );

    // The session cookie works immediately.
    let me = get(app, "/api/auth/me", Some(&cookie)).await;
    assert_eq!(me.status(), StatusCode::OK);
    let me_json = body_json(me).await;
    assert_eq!(me_json["username"], "somchai");
}

/// A duplicate username is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "taken", "staff").await;

    let body = serde_json::json!({
        "username": "taken",
        "password": "another-secret",
        "displayName": "Someone Else",
        "department": "accounting",
        "role": "staff",
    });
    let response = post_json(app, "/api/auth/register", body, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Unknown roles and weak passwords are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation(pool: PgPool) {
    let app = common::build_test_app(pool);

    let bad_role = serde_json::json!({
        "username": "u1",
        "password": "long-enough-password",
        "displayName": "U1",
        "department": "it",
        "role": "superuser",
    });
    let response = post_json(app.clone(), "/api/auth/register", bad_role, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let weak_password = serde_json::json!({
        "username": "u2",
        "password": "short",
        "displayName": "U2",
        "department": "it",
        "role": "staff",
    });
    let response = post_json(app, "/api/auth/register", weak_password, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

/// Login with correct credentials establishes a session.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, _) = register_user(app.clone(), "loginuser", "staff").await;

    let body = serde_json::json!({ "username": "loginuser", "password": "test_password_123" });
    let response = post_json(app.clone(), "/api/auth/login", body, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = session_cookie_from(&response);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user_id);

    let me = get(app, "/api/auth/me", Some(&cookie)).await;
    assert_eq!(me.status(), StatusCode::OK);
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_user(app.clone(), "wrongpw", "staff").await;

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/auth/login", body, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/auth/login", body, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Requests without a session are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes the session; the cookie stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, cookie) = register_user(app.clone(), "leaver", "staff").await;

    let response = post_json(
        app.clone(),
        "/api/auth/logout",
        serde_json::json!({}),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let me = get(app, "/api/auth/me", Some(&cookie)).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

/// Admin routes reject non-admin users with 403 and accept admins.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_enforce_role(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, admin_cookie) = register_user(app.clone(), "boss", "admin").await;
    let (_, staff_cookie) = register_user(app.clone(), "worker", "staff").await;

    let response = get(app.clone(), "/api/admin/users", Some(&staff_cookie)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(app.clone(), "/api/admin/users", Some(&admin_cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let response = get(app, "/api/admin/users", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
