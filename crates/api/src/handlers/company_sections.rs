//! Admin CRUD for the blocks of the company presentation page.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::error::CoreError;
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::company_section::{
    CreateCompanySection, UpdateCompanySection, SECTION_KINDS,
};
use rouge_db::repositories::CompanySectionRepo;

use super::{normalize_slug, not_found, reorder_error, require_slug, ReorderRequest};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_kind(kind: Option<&str>) -> AppResult<()> {
    match kind {
        Some(k) if !SECTION_KINDS.contains(&k) => Err(AppError::Core(CoreError::Validation(
            format!("kind: must be one of {SECTION_KINDS:?}"),
        ))),
        _ => Ok(()),
    }
}

/// GET /api/v1/admin/company-sections
pub async fn list(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sections = CompanySectionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sections }))
}

/// GET /api/v1/admin/company-sections/{id}
pub async fn get(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let section = CompanySectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("CompanySection", id))?;
    Ok(Json(DataResponse { data: section }))
}

/// POST /api/v1/admin/company-sections
///
/// The slug falls back to the title, then to the kind.
pub async fn create(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateCompanySection>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    validate_kind(input.kind.as_deref())?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let fallback = input
        .title
        .as_deref()
        .or(input.kind.as_deref())
        .unwrap_or("section");
    let slug = require_slug(input.slug.as_deref(), fallback)?;
    let section = CompanySectionRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        section_id = section.id,
        slug = %section.slug,
        user_id = user.user_id,
        "Company section created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

/// PUT /api/v1/admin/company-sections/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCompanySection>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    validate_kind(input.kind.as_deref())?;
    input.slug = normalize_slug(input.slug.take())?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let section = CompanySectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("CompanySection", id))?;

    tracing::info!(section_id = id, user_id = user.user_id, "Company section updated");
    Ok(Json(DataResponse { data: section }))
}

/// DELETE /api/v1/admin/company-sections/{id}
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CompanySectionRepo::delete(&state.pool, id).await? {
        return Err(not_found("CompanySection", id));
    }
    tracing::info!(section_id = id, user_id = user.user_id, "Company section deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/company-sections/reorder
pub async fn reorder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let current = CompanySectionRepo::list_ids(&state.pool).await?;
    let updates = input.positions(&current)?;
    CompanySectionRepo::reorder(&state.pool, &updates)
        .await
        .map_err(reorder_error)?;

    tracing::info!(count = updates.len(), user_id = user.user_id, "Company sections reordered");
    let sections = CompanySectionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: sections }))
}
