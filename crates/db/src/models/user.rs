//! User entity model and DTOs.

use hdms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub department: String,
    pub role: String,
    pub email: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub display_name: String,
    pub department: String,
    pub role: String,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            department: user.department,
            role: user.role,
            email: user.email,
            profile_image: user.profile_image,
        }
    }
}

/// DTO for creating a new user. The password is hashed before this point.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub department: String,
    pub role: String,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub display_name: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub profile_image: Option<String>,
}
