//! Admin management of display toggles.
//!
//! Toggles live in `site_settings`; rows are seeded by migration and only
//! their value is editable here.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::display_toggles::{validate_key, ToggleValue};
use rouge_core::error::CoreError;
use rouge_core::validation::validate_dto;
use rouge_db::models::site_setting::UpdateDisplayToggle;
use rouge_db::repositories::SiteSettingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::CategoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn toggle_not_found(key: &str) -> AppError {
    AppError::Core(CoreError::NotFoundByKey {
        entity: "DisplayToggle",
        key: key.to_string(),
    })
}

/// GET /api/v1/admin/display-toggles?category=
pub async fn list_toggles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<impl IntoResponse> {
    let category = params.category.as_deref().map(str::trim).filter(|c| !c.is_empty());
    let toggles = SiteSettingRepo::list(&state.pool, category).await?;
    Ok(Json(DataResponse { data: toggles }))
}

/// GET /api/v1/admin/display-toggles/{key}
pub async fn get_toggle(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_key(&key)?;
    let toggle = SiteSettingRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| toggle_not_found(&key))?;
    Ok(Json(DataResponse { data: toggle }))
}

/// PUT /api/v1/admin/display-toggles/{key}
///
/// Replaces the stored value; sending the same body twice is a no-op.
pub async fn update_toggle(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateDisplayToggle>,
) -> AppResult<impl IntoResponse> {
    validate_key(&key)?;
    validate_dto(&input)?;

    let value = ToggleValue {
        enabled: input.enabled,
        max_items: input.max_items,
    };
    value.validate()?;

    let toggle =
        SiteSettingRepo::update_value(&state.pool, &key, &value.to_json(), Some(admin.user_id))
            .await?
            .ok_or_else(|| toggle_not_found(&key))?;

    tracing::info!(
        key = %key,
        enabled = value.enabled,
        max_items = ?value.max_items,
        user_id = admin.user_id,
        "Display toggle updated"
    );
    Ok(Json(DataResponse { data: toggle }))
}
