//! Handlers for the admin user-management screens.
//!
//! All endpoints here require the admin role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hdms_core::error::CoreError;
use hdms_core::roles::validate_role;
use hdms_core::types::DbId;
use hdms_db::models::user::{CreateUser, UpdateUser, UserResponse};
use hdms_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCreateUserRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub department: String,
    pub role: String,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}

/// GET /api/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /api/admin/users
///
/// Create a user without logging it in.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AdminCreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    validate_role(&input.role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    validate_password_strength(&input.password)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Validation(
            "Username already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username,
        password_hash,
        display_name: input.display_name,
        department: input.department,
        role: input.role,
        email: input.email,
        profile_image: input.profile_image,
    };
    let user = UserRepo::create(&state.pool, &create).await?;

    tracing::info!(admin_id = admin.user_id, user_id = user.id, "Admin created user");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /api/admin/users/{id}
///
/// Partial update of a user's profile fields and role.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(ref role) = input.role {
        validate_role(role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(admin_id = admin.user_id, user_id = id, "Admin updated user");

    Ok(Json(user.into()))
}
