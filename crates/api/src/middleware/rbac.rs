//! Role-gated extractors.
//!
//! Each wraps [`AuthUser`] and rejects with 403 when the role claim is below
//! the required level. Admin handlers take one of these instead of checking
//! roles themselves, so an ungated admin route does not compile into a
//! handler that can see the caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rouge_core::error::CoreError;
use rouge_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Any authenticated user.
pub struct RequireAuth(pub AuthUser);

/// `editor` or `admin`.
///
/// ```ignore
/// async fn create_show(RequireEditor(user): RequireEditor) -> AppResult<StatusCode> { .. }
/// ```
pub struct RequireEditor(pub AuthUser);

/// `admin` only.
pub struct RequireAdmin(pub AuthUser);

async fn require(parts: &mut Parts, state: &AppState, role: Role) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.role.at_least(role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "The {role} role is required"
        ))));
    }
    Ok(user)
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::User).await.map(RequireAuth)
    }
}

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::Editor).await.map(RequireEditor)
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::Admin).await.map(RequireAdmin)
    }
}
