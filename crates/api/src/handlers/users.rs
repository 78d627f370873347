//! Admin user management: listing, invitations, role changes, deactivation
//! and deletion.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::error::CoreError;
use rouge_core::roles::Role;
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::user::{InviteUserRequest, UpdateUserProfile};
use rouge_db::repositories::{InvitationRepo, ProfileRepo, SessionRepo, UserRepo};

use super::not_found;
use crate::error::{AppError, AppResult};
use crate::invitation::{InvitationRequest, InvitationSaga, InvitationSettings, PgInvitationStore};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_with_profiles(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_with_profile(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/admin/users/invite
///
/// Runs the invitation saga. On any failure nothing is left behind.
pub async fn invite_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<InviteUserRequest>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let role: Role = input.role.parse()?;

    let saga = InvitationSaga::new(
        Arc::new(PgInvitationStore::new(state.pool.clone())),
        Arc::clone(&state.mailer),
        InvitationSettings::from_config(&state.config),
    );
    let invited = saga
        .run(InvitationRequest {
            email: input.email,
            display_name: input.display_name,
            role,
            invited_by: Some(admin.user_id),
        })
        .await?;

    tracing::info!(
        user_id = invited.user_id,
        role = %invited.role,
        admin_id = admin.user_id,
        "Invitation sent"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: invited })))
}

/// PUT /api/v1/admin/users/{id}
///
/// Change display name and/or role. Admins cannot demote themselves.
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let role = input.role.as_deref().map(str::parse::<Role>).transpose()?;

    if id == admin.user_id && role.is_some_and(|r| r != Role::Admin) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot change your own admin role".into(),
        )));
    }

    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    let updated = ProfileRepo::update(
        &state.pool,
        id,
        input.display_name.as_deref(),
        role.map(Role::as_str),
    )
    .await?;
    if updated.is_none() {
        // Account predates profiles; create one.
        ProfileRepo::upsert(
            &state.pool,
            id,
            input.display_name.as_deref(),
            role.unwrap_or(Role::User).as_str(),
        )
        .await?;
    }

    if role.is_some() {
        // Outstanding tokens carry the old role claim.
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    let user = UserRepo::find_with_profile(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    tracing::info!(user_id = id, role = ?user.role, admin_id = admin.user_id, "User updated");
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/admin/users/{id}/deactivate
///
/// Revokes sessions and expires any pending invitation.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot deactivate your own account".into(),
        )));
    }
    if !UserRepo::deactivate(&state.pool, id).await? {
        return Err(not_found("User", id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    let expired = InvitationRepo::expire_pending_for_user(&state.pool, id).await?;

    tracing::info!(
        user_id = id,
        admin_id = admin.user_id,
        expired_invitations = expired,
        "User deactivated"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/users/{id}
///
/// Removes the profile, then the user.
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot delete your own account".into(),
        )));
    }
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("User", id))?;

    ProfileRepo::delete_by_user_id(&state.pool, id).await?;
    UserRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
