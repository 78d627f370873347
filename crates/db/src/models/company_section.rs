//! Company presentation sections ("la compagnie" page).

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Section kinds accepted by `chk_company_sections_kind`.
pub const SECTION_KINDS: &[&str] =
    &["hero", "history", "quote", "values", "team", "mission", "text"];

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompanySection {
    pub id: DbId,
    pub slug: String,
    pub kind: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub position: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompanySection {
    /// Generated from `title` when omitted.
    pub slug: Option<String>,
    /// Defaults to `text`.
    pub kind: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCompanySection {
    pub slug: Option<String>,
    pub kind: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub image_media_id: Option<DbId>,
    pub is_active: Option<bool>,
}
