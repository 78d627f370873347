//! Admin CRUD and drag-and-drop ordering for team members.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::team_member::{CreateTeamMember, UpdateTeamMember};
use rouge_db::repositories::TeamMemberRepo;

use super::{not_found, reorder_error, ReorderRequest};
use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/team
///
/// Inactive rows included, in display order.
pub async fn list(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = TeamMemberRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/team/{id}
pub async fn get(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = TeamMemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("TeamMember", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/team
///
/// Appended at the end of the list.
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateTeamMember>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let item = TeamMemberRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = item.id,
        position = item.position,
        user_id = user.user_id,
        "TeamMember created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/team/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTeamMember>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let item = TeamMemberRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("TeamMember", id))?;

    tracing::info!(id, user_id = user.user_id, "TeamMember updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/team/{id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TeamMemberRepo::delete(&state.pool, id).await? {
        return Err(not_found("TeamMember", id));
    }
    tracing::info!(id, user_id = user.user_id, "TeamMember deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/team/reorder
///
/// All positions are written in one transaction; on error the stored order
/// is unchanged.
pub async fn reorder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let current = TeamMemberRepo::list_ids(&state.pool).await?;
    let updates = input.positions(&current)?;
    TeamMemberRepo::reorder(&state.pool, &updates)
        .await
        .map_err(reorder_error)?;

    tracing::info!(count = updates.len(), user_id = user.user_id, "TeamMember list reordered");
    let items = TeamMemberRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}
