//! Show (spectacle) model and DTOs.

use rouge_core::publication::ImageRef;
use rouge_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::event::ShowEvent;

/// A row from the `shows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Show {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub duration_minutes: Option<i32>,
    pub casting: Option<String>,
    pub premiere_on: Option<Date>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub is_public: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Show {
    pub fn image(&self) -> ImageRef<'_> {
        ImageRef {
            image_url: self.image_url.as_deref(),
            image_media_id: self.image_media_id,
        }
    }
}

/// A published show with its upcoming dates, as served to the public site.
#[derive(Debug, Clone, Serialize)]
pub struct ShowDetail {
    #[serde(flatten)]
    pub show: Show,
    pub upcoming_events: Vec<ShowEvent>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShow {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    /// Generated from `title` when omitted.
    pub slug: Option<String>,
    /// Defaults to `draft`.
    pub status: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "must be positive"))]
    pub duration_minutes: Option<i32>,
    pub casting: Option<String>,
    pub premiere_on: Option<Date>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    #[serde(default)]
    pub is_public: bool,
}

impl CreateShow {
    pub fn image(&self) -> ImageRef<'_> {
        ImageRef {
            image_url: self.image_url.as_deref(),
            image_media_id: self.image_media_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateShow {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub status: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "must be positive"))]
    pub duration_minutes: Option<i32>,
    pub casting: Option<String>,
    pub premiere_on: Option<Date>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub is_public: Option<bool>,
}
