//! Home page carousel slides.
//!
//! Slides are shown in `position` order; inactive slides stay in the list
//! but are not served publicly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::error::CoreError;
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::hero_slide::{CreateHeroSlide, UpdateHeroSlide};
use rouge_db::repositories::HeroSlideRepo;

use super::{not_found, reorder_error, ReorderRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/hero-slides
pub async fn list(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = HeroSlideRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/hero-slides/{id}
pub async fn get(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = HeroSlideRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("HeroSlide", id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/v1/admin/hero-slides
///
/// Appended at the end of the list.
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateHeroSlide>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    validate_cta_url(input.cta_url.as_deref())?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let item = HeroSlideRepo::create(&state.pool, &input).await?;

    tracing::info!(
        id = item.id,
        position = item.position,
        user_id = user.user_id,
        "HeroSlide created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/hero-slides/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHeroSlide>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    validate_cta_url(input.cta_url.as_deref())?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let item = HeroSlideRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("HeroSlide", id))?;

    tracing::info!(id, user_id = user.user_id, "HeroSlide updated");
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/hero-slides/{id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !HeroSlideRepo::delete(&state.pool, id).await? {
        return Err(not_found("HeroSlide", id));
    }
    tracing::info!(id, user_id = user.user_id, "HeroSlide deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/hero-slides/reorder
///
/// All positions are written in one transaction; on error the stored order
/// is unchanged.
pub async fn reorder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let current = HeroSlideRepo::list_ids(&state.pool).await?;
    let updates = input.positions(&current)?;
    HeroSlideRepo::reorder(&state.pool, &updates)
        .await
        .map_err(reorder_error)?;

    tracing::info!(count = updates.len(), user_id = user.user_id, "HeroSlide list reordered");
    let items = HeroSlideRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// CTA links point either into the site (`/agenda`) or to an http(s) page.
fn validate_cta_url(url: Option<&str>) -> AppResult<()> {
    match url.map(str::trim) {
        None | Some("") => Ok(()),
        Some(u) if u.starts_with('/') && !u.starts_with("//") => Ok(()),
        Some(u) if u.starts_with("https://") || u.starts_with("http://") => Ok(()),
        Some(_) => Err(AppError::Core(CoreError::Validation(
            "cta_url: must be a site path or an http(s) URL".into(),
        ))),
    }
}
