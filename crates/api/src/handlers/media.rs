//! Media library: uploads, metadata, tags, folders, and remote image URL
//! validation.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use rouge_core::error::CoreError;
use rouge_core::media::{image_dimensions, is_image, storage_key, validate_upload};
use rouge_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::media::{
    CreateMediaFolder, CreateMediaItem, CreateMediaTag, MediaFilter, MediaItem,
    MediaItemResponse, SetMediaTags, UpdateMediaFolder, UpdateMediaItem, UpdateMediaTag,
};
use rouge_db::repositories::{MediaFolderRepo, MediaRepo, MediaTagRepo};
use serde::Deserialize;
use uuid::Uuid;

use super::{normalize_slug, not_found, require_slug};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::ForceParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ValidateUrlRequest {
    pub url: String,
}

/// Attach public URLs and tags to a page of items.
async fn with_tags(state: &AppState, items: Vec<MediaItem>) -> AppResult<Vec<MediaItemResponse>> {
    let ids: Vec<DbId> = items.iter().map(|m| m.id).collect();
    let mut tags = MediaRepo::tags_for(&state.pool, &ids).await?;
    Ok(items
        .into_iter()
        .map(|item| MediaItemResponse {
            url: state.storage.public_url(&item.storage_path),
            tags: tags.remove(&item.id).unwrap_or_default(),
            item,
        })
        .collect())
}

async fn single(state: &AppState, item: MediaItem) -> AppResult<MediaItemResponse> {
    with_tags(state, vec![item])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalError("media item vanished while loading tags".into()))
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/media
///
/// Multipart fields: `file` (required), `alt_text`, `folder_id`.
pub async fn upload(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut alt_text = None;
    let mut folder_id = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let mime = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_ascii_lowercase();
                let bytes = field.bytes().await?;
                file = Some((filename, mime, bytes.to_vec()));
            }
            Some("alt_text") => {
                let text = field.text().await?;
                alt_text = Some(text.trim().to_string()).filter(|t| !t.is_empty());
            }
            Some("folder_id") => {
                let raw = field.text().await?;
                let id = raw.trim().parse::<DbId>().map_err(|_| {
                    AppError::Core(CoreError::Validation("folder_id: must be an integer".into()))
                })?;
                folder_id = Some(id);
            }
            _ => {}
        }
    }

    let (filename, mime, bytes) = file.ok_or_else(|| {
        AppError::Core(CoreError::Validation("file: a file field is required".into()))
    })?;
    validate_upload(&mime, bytes.len(), state.config.max_upload_bytes)?;

    let (width, height) = if is_image(&mime) {
        image_dimensions(&bytes)
            .map(|(w, h)| (i32::try_from(w).ok(), i32::try_from(h).ok()))
            .unwrap_or((None, None))
    } else {
        (None, None)
    };

    let key = storage_key(&filename, &mime, &Uuid::new_v4().simple().to_string(), Utc::now())?;
    state.storage.put(&key, &bytes).await?;

    let input = CreateMediaItem {
        storage_path: key.clone(),
        original_filename: filename,
        mime_type: mime,
        size_bytes: bytes.len() as i64,
        width,
        height,
        alt_text,
        folder_id,
        uploaded_by: Some(user.user_id),
    };
    let item = match MediaRepo::create(&state.pool, &input).await {
        Ok(item) => item,
        Err(e) => {
            // No row points at the object; remove it.
            if let Err(cleanup) = state.storage.delete(&key).await {
                tracing::error!(key = %key, error = %cleanup, "Orphaned media object");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        media_id = item.id,
        key = %item.storage_path,
        size = item.size_bytes,
        user_id = user.user_id,
        "Media uploaded"
    );
    let response = single(&state, item).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/admin/media?folder_id=&tag_id=&q=&limit=&offset=
pub async fn list(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Query(filter): Query<MediaFilter>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(filter.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(filter.offset);
    let items = MediaRepo::list(&state.pool, &filter, limit, offset).await?;
    Ok(Json(DataResponse {
        data: with_tags(&state, items).await?,
    }))
}

/// GET /api/v1/admin/media/{id}
pub async fn get(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("MediaItem", id))?;
    Ok(Json(DataResponse {
        data: single(&state, item).await?,
    }))
}

/// PUT /api/v1/admin/media/{id}
pub async fn update(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMediaItem>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let item = MediaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("MediaItem", id))?;

    tracing::info!(media_id = id, user_id = user.user_id, "Media updated");
    Ok(Json(DataResponse {
        data: single(&state, item).await?,
    }))
}

/// DELETE /api/v1/admin/media/{id}?force=
///
/// Refused with 409 while content references the item, unless `force`.
/// Forcing clears the references, and fails with 400 on the `chk_*_public_image`
/// constraints if a public show or press release would lose its only image.
/// The row goes first; a failed object deletion is only logged.
pub async fn delete(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ForceParams>,
) -> AppResult<StatusCode> {
    if !params.force && MediaRepo::is_referenced(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Media item is used by published content; pass force=true to delete it anyway".into(),
        )));
    }

    let item = MediaRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("MediaItem", id))?;

    if let Err(e) = state.storage.delete(&item.storage_path).await {
        tracing::error!(
            media_id = id,
            key = %item.storage_path,
            error = %e,
            "Media object not removed"
        );
    }

    tracing::info!(media_id = id, user_id = user.user_id, forced = params.force, "Media deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/media/{id}/tags
///
/// Replaces the item's tag set.
pub async fn set_tags(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetMediaTags>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let item = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("MediaItem", id))?;

    MediaRepo::set_tags(&state.pool, id, &input.tag_ids).await?;

    tracing::info!(
        media_id = id,
        tags = input.tag_ids.len(),
        user_id = user.user_id,
        "Media tags set"
    );
    Ok(Json(DataResponse {
        data: single(&state, item).await?,
    }))
}

/// POST /api/v1/admin/media/validate-url
///
/// Check an external image URL without storing anything.
pub async fn validate_url(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<ValidateUrlRequest>,
) -> AppResult<impl IntoResponse> {
    let validated = state.image_checker.validate(&input.url).await?;
    Ok(Json(DataResponse { data: validated }))
}

// ---------------------------------------------------------------------------
// Folders
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/media/folders
pub async fn list_folders(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let folders = MediaFolderRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: folders }))
}

/// POST /api/v1/admin/media/folders
pub async fn create_folder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateMediaFolder>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let slug = require_slug(input.slug.as_deref(), &input.name)?;
    let folder = MediaFolderRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(folder_id = folder.id, user_id = user.user_id, "Media folder created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: folder })))
}

/// PUT /api/v1/admin/media/folders/{id}
pub async fn update_folder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMediaFolder>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if input.parent_id == Some(id) {
        return Err(AppError::Core(CoreError::Validation(
            "parent_id: a folder cannot contain itself".into(),
        )));
    }
    input.slug = normalize_slug(input.slug.take())?;
    let folder = MediaFolderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("MediaFolder", id))?;

    tracing::info!(folder_id = id, user_id = user.user_id, "Media folder updated");
    Ok(Json(DataResponse { data: folder }))
}

/// DELETE /api/v1/admin/media/folders/{id}
///
/// Items in the folder are kept, unfiled.
pub async fn delete_folder(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MediaFolderRepo::delete(&state.pool, id).await? {
        return Err(not_found("MediaFolder", id));
    }
    tracing::info!(folder_id = id, user_id = user.user_id, "Media folder deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/media/tags
pub async fn list_tags(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tags = MediaTagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/admin/media/tags
pub async fn create_tag(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateMediaTag>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let slug = require_slug(input.slug.as_deref(), &input.name)?;
    let tag = MediaTagRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(tag_id = tag.id, user_id = user.user_id, "Media tag created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// PUT /api/v1/admin/media/tags/{id}
pub async fn update_tag(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMediaTag>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    input.slug = normalize_slug(input.slug.take())?;
    let tag = MediaTagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("MediaTag", id))?;

    tracing::info!(tag_id = id, user_id = user.user_id, "Media tag updated");
    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/admin/media/tags/{id}
pub async fn delete_tag(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MediaTagRepo::delete(&state.pool, id).await? {
        return Err(not_found("MediaTag", id));
    }
    tracing::info!(tag_id = id, user_id = user.user_id, "Media tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
