//! Admin CRUD for venues.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::venue::{CreateVenue, UpdateVenue};
use rouge_db::repositories::VenueRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/venues
pub async fn list_venues(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: venues }))
}

/// GET /api/v1/admin/venues/{id}
pub async fn get_venue(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Venue", id))?;
    Ok(Json(DataResponse { data: venue }))
}

/// POST /api/v1/admin/venues
pub async fn create_venue(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateVenue>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let venue = VenueRepo::create(&state.pool, &input).await?;

    tracing::info!(venue_id = venue.id, user_id = user.user_id, "Venue created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: venue })))
}

/// PUT /api/v1/admin/venues/{id}
pub async fn update_venue(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateVenue>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    let venue = VenueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Venue", id))?;

    tracing::info!(venue_id = id, user_id = user.user_id, "Venue updated");
    Ok(Json(DataResponse { data: venue }))
}

/// DELETE /api/v1/admin/venues/{id}
///
/// Events at the venue keep existing with no venue.
pub async fn delete_venue(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VenueRepo::delete(&state.pool, id).await? {
        return Err(not_found("Venue", id));
    }
    tracing::info!(venue_id = id, user_id = user.user_id, "Venue deleted");
    Ok(StatusCode::NO_CONTENT)
}
