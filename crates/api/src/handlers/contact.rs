//! Back-office inbox for contact form messages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rouge_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use rouge_core::types::DbId;
use rouge_db::repositories::ContactMessageRepo;
use serde::Deserialize;

use super::not_found;
use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageListParams {
    #[serde(default)]
    pub unhandled_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/v1/admin/contact-messages?unhandled_only=&limit=&offset=
pub async fn list_messages(
    RequireEditor(_user): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<MessageListParams>,
) -> AppResult<impl IntoResponse> {
    let messages = ContactMessageRepo::list(
        &state.pool,
        params.unhandled_only,
        clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/admin/contact-messages/{id}/handled
pub async fn mark_handled(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::mark_handled(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ContactMessage", id))?;

    tracing::info!(message_id = id, user_id = user.user_id, "Contact message handled");
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/admin/contact-messages/{id}
pub async fn delete_message(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactMessageRepo::delete(&state.pool, id).await? {
        return Err(not_found("ContactMessage", id));
    }
    tracing::info!(message_id = id, user_id = user.user_id, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
