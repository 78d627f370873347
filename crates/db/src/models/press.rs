//! Press models: releases (communiqués), articles and press contacts.

use rouge_core::publication::ImageRef;
use rouge_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Press releases
// ---------------------------------------------------------------------------

/// A row from the `press_releases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressRelease {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub published_on: Date,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub document_media_id: Option<DbId>,
    pub show_id: Option<DbId>,
    pub event_id: Option<DbId>,
    pub is_public: bool,
    pub position: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PressRelease {
    pub fn image(&self) -> ImageRef<'_> {
        ImageRef {
            image_url: self.image_url.as_deref(),
            image_media_id: self.image_media_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePressRelease {
    #[validate(length(min = 1, max = 300, message = "must be 1-300 characters"))]
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    /// Defaults to today.
    pub published_on: Option<Date>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub document_media_id: Option<DbId>,
    pub show_id: Option<DbId>,
    pub event_id: Option<DbId>,
    #[serde(default)]
    pub is_public: bool,
}

impl CreatePressRelease {
    pub fn image(&self) -> ImageRef<'_> {
        ImageRef {
            image_url: self.image_url.as_deref(),
            image_media_id: self.image_media_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePressRelease {
    #[validate(length(min = 1, max = 300, message = "must be 1-300 characters"))]
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub published_on: Option<Date>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub document_media_id: Option<DbId>,
    pub show_id: Option<DbId>,
    pub event_id: Option<DbId>,
    pub is_public: Option<bool>,
}

// ---------------------------------------------------------------------------
// Press articles
// ---------------------------------------------------------------------------

/// Coverage of the company in the press (reviews, interviews, portraits).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressArticle {
    pub id: DbId,
    pub title: String,
    pub author: Option<String>,
    pub kind: String,
    pub lead: Option<String>,
    pub excerpt: Option<String>,
    pub source_publication: Option<String>,
    pub source_url: Option<String>,
    pub published_on: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePressArticle {
    #[validate(length(min = 1, max = 300, message = "must be 1-300 characters"))]
    pub title: String,
    pub author: Option<String>,
    /// Defaults to `article`.
    pub kind: Option<String>,
    pub lead: Option<String>,
    pub excerpt: Option<String>,
    pub source_publication: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub source_url: Option<String>,
    pub published_on: Option<Date>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePressArticle {
    #[validate(length(min = 1, max = 300, message = "must be 1-300 characters"))]
    pub title: Option<String>,
    pub author: Option<String>,
    pub kind: Option<String>,
    pub lead: Option<String>,
    pub excerpt: Option<String>,
    pub source_publication: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub source_url: Option<String>,
    pub published_on: Option<Date>,
}

// ---------------------------------------------------------------------------
// Press contacts
// ---------------------------------------------------------------------------

/// A journalist or media contact. Never exposed publicly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PressContact {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: String,
    pub role_title: Option<String>,
    pub organization: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialties: Vec<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePressContact {
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub last_name: String,
    pub role_title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub organization: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePressContact {
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 120, message = "must be 1-120 characters"))]
    pub last_name: Option<String>,
    pub role_title: Option<String>,
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub organization: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}
