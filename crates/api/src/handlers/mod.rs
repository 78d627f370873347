//! Request handlers, one module per resource.
//!
//! Admin handlers take an RBAC extractor, delegate to the repositories in
//! `rouge_db` and map errors through [`AppError`]. Public handlers only ever
//! read public rows.

use rouge_core::error::CoreError;
use rouge_core::reorder::{assign_positions, move_item, PositionUpdate};
use rouge_core::slug::resolve_slug;
use rouge_core::types::DbId;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub mod auth;
pub mod company_sections;
pub mod contact;
pub mod display_toggles;
pub mod events;
pub mod hero_slides;
pub mod media;
pub mod partners;
pub mod press;
pub mod public;
pub mod shows;
pub mod team;
pub mod users;
pub mod venues;

pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Slug for a new record: the supplied one (canonicalised) or one derived
/// from `fallback`.
pub(crate) fn require_slug(explicit: Option<&str>, fallback: &str) -> AppResult<String> {
    resolve_slug(explicit, fallback).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "slug: cannot be derived from an empty value".into(),
        ))
    })
}

/// Canonicalise a slug supplied on update, if any.
pub(crate) fn normalize_slug(explicit: Option<String>) -> AppResult<Option<String>> {
    explicit
        .map(|s| require_slug(Some(&s), &s))
        .transpose()
}

/// Body of the `PUT .../reorder` endpoints: either the complete new order,
/// or a single drag from one index to another.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReorderRequest {
    Ids { ids: Vec<DbId> },
    Move { from: usize, to: usize },
}

impl ReorderRequest {
    /// Turn the request into positions for the ids `current` holds, in
    /// their stored order.
    pub(crate) fn positions(self, current: &[DbId]) -> AppResult<Vec<PositionUpdate>> {
        let requested = match self {
            ReorderRequest::Ids { ids } => ids,
            ReorderRequest::Move { from, to } => {
                let mut ids = current.to_vec();
                move_item(&mut ids, from, to)?;
                ids
            }
        };
        Ok(assign_positions(current, &requested)?)
    }
}

/// A row vanished between validation and the write; the batch was rolled back.
pub(crate) fn reorder_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::RowNotFound => AppError::Core(CoreError::Conflict(
            "The list changed while reordering; reload and try again".into(),
        )),
        other => AppError::Database(other),
    }
}
