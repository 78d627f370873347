//! Admin CRUD for shows (spectacles).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::publication::{require_image_when_public, validate_show_status, ImageRef};
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::show::{CreateShow, UpdateShow};
use rouge_db::repositories::ShowRepo;

use super::{normalize_slug, not_found, require_slug};
use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::query::StatusParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/shows?status=
pub async fn list_shows(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        validate_show_status(status)?;
    }
    let shows = ShowRepo::list(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: shows }))
}

/// GET /api/v1/admin/shows/{id}
pub async fn get_show(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let show = ShowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Show", id))?;
    Ok(Json(DataResponse { data: show }))
}

/// POST /api/v1/admin/shows
pub async fn create_show(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateShow>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if let Some(status) = input.status.as_deref() {
        validate_show_status(status)?;
    }
    require_image_when_public("show", input.is_public, input.image())?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let slug = require_slug(input.slug.as_deref(), &input.title)?;
    let show = ShowRepo::create(&state.pool, &input, &slug, Some(user.user_id)).await?;

    tracing::info!(show_id = show.id, slug = %show.slug, user_id = user.user_id, "Show created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: show })))
}

/// PUT /api/v1/admin/shows/{id}
///
/// The image rule is checked against the row as it will be after the update.
pub async fn update_show(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateShow>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if let Some(status) = input.status.as_deref() {
        validate_show_status(status)?;
    }
    input.slug = normalize_slug(input.slug.take())?;

    let current = ShowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Show", id))?;

    let merged = ImageRef {
        image_url: input.image_url.as_deref().or(current.image_url.as_deref()),
        image_media_id: input.image_media_id.or(current.image_media_id),
    };
    require_image_when_public("show", input.is_public.unwrap_or(current.is_public), merged)?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let show = ShowRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Show", id))?;

    tracing::info!(show_id = id, user_id = user.user_id, "Show updated");
    Ok(Json(DataResponse { data: show }))
}

/// DELETE /api/v1/admin/shows/{id}
///
/// Cascades to the show's events.
pub async fn delete_show(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ShowRepo::delete(&state.pool, id).await? {
        return Err(not_found("Show", id));
    }
    tracing::info!(show_id = id, user_id = user.user_id, "Show deleted");
    Ok(StatusCode::NO_CONTENT)
}
