//! Site settings rows holding display toggles.

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `site_settings` table. `value` holds a
/// [`rouge_core::display_toggles::ToggleValue`] as JSON.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteSetting {
    pub id: DbId,
    pub key: String,
    pub value: serde_json::Value,
    pub description: Option<String>,
    pub category: String,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `PUT /admin/display-toggles/{key}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDisplayToggle {
    pub enabled: bool,
    #[validate(range(min = 1, max = 50, message = "must be between 1 and 50"))]
    pub max_items: Option<i32>,
}
