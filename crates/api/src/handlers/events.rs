//! Admin CRUD for show events (performance dates).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::publication::{validate_event_status, validate_event_window, validate_ticket_url};
use rouge_core::types::DbId;
use rouge_core::validation::validate_dto;
use rouge_db::models::event::{CreateShowEvent, EventFilter, UpdateShowEvent};
use rouge_db::repositories::EventRepo;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/events?show_id=&from=&to=
pub async fn list_events(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> AppResult<impl IntoResponse> {
    let events = EventRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/admin/events/{id}
pub async fn get_event(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ShowEvent", id))?;
    Ok(Json(DataResponse { data: event }))
}

/// POST /api/v1/admin/events
///
/// An unknown `show_id` or `venue_id` is rejected by the foreign keys.
pub async fn create_event(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateShowEvent>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if let Some(status) = input.status.as_deref() {
        validate_event_status(status)?;
    }
    validate_event_window(input.starts_at, input.ends_at)?;
    validate_ticket_url(input.ticket_url.as_deref())?;

    let event = EventRepo::create(&state.pool, &input).await?;

    tracing::info!(
        event_id = event.id,
        show_id = event.show_id,
        user_id = user.user_id,
        "Event created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/v1/admin/events/{id}
pub async fn update_event(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateShowEvent>,
) -> AppResult<impl IntoResponse> {
    validate_dto(&input)?;
    if let Some(status) = input.status.as_deref() {
        validate_event_status(status)?;
    }
    validate_ticket_url(input.ticket_url.as_deref())?;

    let current = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ShowEvent", id))?;
    validate_event_window(
        input.starts_at.unwrap_or(current.starts_at),
        input.ends_at.or(current.ends_at),
    )?;

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("ShowEvent", id))?;

    tracing::info!(event_id = id, user_id = user.user_id, "Event updated");
    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/admin/events/{id}
pub async fn delete_event(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !EventRepo::delete(&state.pool, id).await? {
        return Err(not_found("ShowEvent", id));
    }
    tracing::info!(event_id = id, user_id = user.user_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}
