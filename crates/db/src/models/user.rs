//! User, profile and invitation models.
//!
//! Identity (`users`) is kept apart from the editorial profile (`profiles`)
//! so that an invited account exists before its role is assigned.

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    /// `None` until the invitation has been accepted.
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub invited_at: Option<Timestamp>,
    pub email_confirmed_at: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// User joined with its profile, as listed in the back-office.
///
/// `role` is `None` for an account whose profile was never created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub invited_at: Option<Timestamp>,
    pub email_confirmed_at: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the `invitations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Invitation {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
    pub invited_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users/invite`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InviteUserRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub display_name: Option<String>,
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}`. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserProfile {
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub display_name: Option<String>,
    pub role: Option<String>,
}
