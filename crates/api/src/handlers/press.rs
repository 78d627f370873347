//! Admin handlers for the press area: releases (communiqués), articles
//! about the company, and the press contact book.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::pagination::{clamp_limit, MAX_LIMIT};
use rouge_core::publication::{require_image_when_public, validate_article_kind, ImageRef};
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::press::{
    CreatePressArticle, CreatePressContact, CreatePressRelease, UpdatePressArticle,
    UpdatePressContact, UpdatePressRelease,
};
use rouge_db::repositories::{PressArticleRepo, PressContactRepo, PressReleaseRepo};

use super::{normalize_slug, not_found, require_slug};
use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::query::{IncludeInactiveParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Press releases
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/press-releases
pub async fn list_releases(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let releases = PressReleaseRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: releases }))
}

/// GET /api/v1/admin/press-releases/{id}
pub async fn get_release(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let release = PressReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PressRelease", id))?;
    Ok(Json(DataResponse { data: release }))
}

/// POST /api/v1/admin/press-releases
///
/// A public release must carry an image.
pub async fn create_release(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePressRelease>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    require_image_when_public("press release", input.is_public, input.image())?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let slug = require_slug(input.slug.as_deref(), &input.title)?;
    let release = PressReleaseRepo::create(&state.pool, &input, &slug, Some(user.user_id)).await?;

    tracing::info!(
        release_id = release.id,
        is_public = release.is_public,
        user_id = user.user_id,
        "Press release created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: release })))
}

/// PUT /api/v1/admin/press-releases/{id}
///
/// Publishing a release that has no image, or clearing the image of a
/// public one, is rejected.
pub async fn update_release(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePressRelease>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    input.slug = normalize_slug(input.slug.take())?;

    let current = PressReleaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PressRelease", id))?;

    let merged = ImageRef {
        image_url: input.image_url.as_deref().or(current.image_url.as_deref()),
        image_media_id: input.image_media_id.or(current.image_media_id),
    };
    require_image_when_public(
        "press release",
        input.is_public.unwrap_or(current.is_public),
        merged,
    )?;
    state
        .image_checker
        .validate_field(input.image_url.as_deref())
        .await?;

    let release = PressReleaseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("PressRelease", id))?;

    tracing::info!(release_id = id, user_id = user.user_id, "Press release updated");
    Ok(Json(DataResponse { data: release }))
}

/// DELETE /api/v1/admin/press-releases/{id}
pub async fn delete_release(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PressReleaseRepo::delete(&state.pool, id).await? {
        return Err(not_found("PressRelease", id));
    }
    tracing::info!(release_id = id, user_id = user.user_id, "Press release deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Press articles
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/press-articles?limit=
pub async fn list_articles(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, MAX_LIMIT, MAX_LIMIT);
    let articles = PressArticleRepo::list(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /api/v1/admin/press-articles/{id}
pub async fn get_article(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = PressArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PressArticle", id))?;
    Ok(Json(DataResponse { data: article }))
}

/// POST /api/v1/admin/press-articles
pub async fn create_article(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePressArticle>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if let Some(kind) = input.kind.as_deref() {
        validate_article_kind(kind)?;
    }
    let article = PressArticleRepo::create(&state.pool, &input).await?;

    tracing::info!(article_id = article.id, user_id = user.user_id, "Press article created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /api/v1/admin/press-articles/{id}
pub async fn update_article(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePressArticle>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if let Some(kind) = input.kind.as_deref() {
        validate_article_kind(kind)?;
    }
    let article = PressArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("PressArticle", id))?;

    tracing::info!(article_id = id, user_id = user.user_id, "Press article updated");
    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/admin/press-articles/{id}
pub async fn delete_article(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PressArticleRepo::delete(&state.pool, id).await? {
        return Err(not_found("PressArticle", id));
    }
    tracing::info!(article_id = id, user_id = user.user_id, "Press article deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Press contacts
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/press-contacts?include_inactive=
pub async fn list_contacts(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let contacts = PressContactRepo::list(&state.pool, !params.include_inactive).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// GET /api/v1/admin/press-contacts/{id}
pub async fn get_contact(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let contact = PressContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("PressContact", id))?;
    Ok(Json(DataResponse { data: contact }))
}

/// POST /api/v1/admin/press-contacts
pub async fn create_contact(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreatePressContact>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let contact = PressContactRepo::create(&state.pool, &input).await?;

    tracing::info!(contact_id = contact.id, user_id = user.user_id, "Press contact created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: contact })))
}

/// PUT /api/v1/admin/press-contacts/{id}
pub async fn update_contact(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePressContact>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let contact = PressContactRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("PressContact", id))?;

    tracing::info!(contact_id = id, user_id = user.user_id, "Press contact updated");
    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /api/v1/admin/press-contacts/{id}
pub async fn delete_contact(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PressContactRepo::delete(&state.pool, id).await? {
        return Err(not_found("PressContact", id));
    }
    tracing::info!(contact_id = id, user_id = user.user_id, "Press contact deleted");
    Ok(StatusCode::NO_CONTENT)
}
