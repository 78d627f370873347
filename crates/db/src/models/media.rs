//! Media library models: items, folders and tags.

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `media_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    /// Key in the storage backend, e.g. `media/2025/03/<uuid>-affiche.jpg`.
    pub storage_path: String,
    pub original_filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub alt_text: Option<String>,
    pub folder_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaFolder {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaTag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A media item with its public URL and tags, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MediaItemResponse {
    #[serde(flatten)]
    pub item: MediaItem,
    pub url: String,
    pub tags: Vec<MediaTag>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Insert payload built by the upload handler after the object is stored.
#[derive(Debug, Clone)]
pub struct CreateMediaItem {
    pub storage_path: String,
    pub original_filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub alt_text: Option<String>,
    pub folder_id: Option<DbId>,
    pub uploaded_by: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMediaItem {
    #[validate(length(max = 300, message = "must be at most 300 characters"))]
    pub alt_text: Option<String>,
    pub folder_id: Option<DbId>,
}

/// Query filters for `GET /admin/media`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaFilter {
    pub folder_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    /// Case-insensitive match on filename and alt text.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetMediaTags {
    #[validate(length(max = 50, message = "at most 50 tags"))]
    pub tag_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMediaFolder {
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub name: String,
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMediaFolder {
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMediaTag {
    #[validate(length(min = 1, max = 60, message = "must be 1-60 characters"))]
    pub name: String,
    pub slug: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMediaTag {
    #[validate(length(min = 1, max = 60, message = "must be 1-60 characters"))]
    pub name: Option<String>,
    pub slug: Option<String>,
    pub color: Option<String>,
}
