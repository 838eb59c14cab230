#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

use hdms_api::config::ServerConfig;
use hdms_api::routes;
use hdms_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uploads land in a per-process temp directory so tests never touch the
/// working tree.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: std::env::temp_dir().join(format!("hdms-test-uploads-{}", std::process::id())),
        session_ttl_hours: 24,
    }
}

/// Build the application router with the middleware layers that matter
/// for tests, using the given database pool.
///
/// This mirrors the router construction in `main.rs` (minus CORS and
/// tracing noise) so integration tests exercise the same stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config()),
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(DefaultBodyLimit::max(12 * 1024 * 1024))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a request with an optional JSON body and session cookie.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, None, cookie).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), cookie).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), cookie).await
}

pub async fn delete(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, Method::DELETE, uri, None, cookie).await
}

/// Send a multipart form with text fields and an optional file part.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
    cookie: Option<&str>,
) -> Response<Body> {
    const BOUNDARY: &str = "hdms-test-boundary";

    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }

    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Extract the `hdms_session=<token>` pair from a Set-Cookie header.
pub fn session_cookie_from(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("response must carry a Set-Cookie header")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair present")
        .to_string()
}

/// Register a user through the API and return `(user_id, session_cookie)`.
pub async fn register_user(
    app: Router,
    username: &str,
    role: &str,
) -> (i64, String) {
    let body = serde_json::json!({
        "username": username,
        "password": "test_password_123",
        "displayName": username,
        "department": "personnel",
        "role": role,
    });
    let response = post_json(app, "/api/auth/register", body, None).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = session_cookie_from(&response);
    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_i64().expect("user id in response");
    (user_id, cookie)
}
