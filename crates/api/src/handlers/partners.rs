//! Partners and sponsors shown in the home page logo strip.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::partner::{CreatePartner, UpdatePartner};
use rouge_db::repositories::PartnerRepo;

use super::{not_found, reorder_error, ReorderRequest};
use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/partners
pub async fn list(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = PartnerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/partners/{id}
pub async fn get(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = PartnerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Partner", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/partners
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePartner>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    state
        .image_checker
        .validate_field(input.logo_url.as_deref())
        .await?;

    let item = PartnerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = item.id,
        position = item.position,
        user_id = user.user_id,
        "Partner created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/partners/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePartner>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    state
        .image_checker
        .validate_field(input.logo_url.as_deref())
        .await?;

    let item = PartnerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Partner", id))?;

    tracing::info!(id, user_id = user.user_id, "Partner updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/partners/{id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PartnerRepo::delete(&state.pool, id).await? {
        return Err(not_found("Partner", id));
    }
    tracing::info!(id, user_id = user.user_id, "Partner deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/partners/reorder
pub async fn reorder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let current = PartnerRepo::list_ids(&state.pool).await?;
    let updates = input.positions(&current)?;
    PartnerRepo::reorder(&state.pool, &updates)
        .await
        .map_err(reorder_error)?;

    tracing::info!(count = updates.len(), user_id = user.user_id, "Partner list reordered");
    let items = PartnerRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}
