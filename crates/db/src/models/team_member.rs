//! Team member model and DTOs.

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TeamMember {
    pub id: DbId,
    pub name: String,
    pub role_title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New members are appended after the current last position.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeamMember {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub role_title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTeamMember {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    pub role_title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub is_active: Option<bool>,
}
