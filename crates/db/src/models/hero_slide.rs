//! Home page hero carousel slides.

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HeroSlide {
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHeroSlide {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: String,
    pub subtitle: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    #[validate(length(max = 60, message = "must be at most 60 characters"))]
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateHeroSlide {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    #[validate(length(max = 60, message = "must be at most 60 characters"))]
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub is_active: Option<bool>,
}
