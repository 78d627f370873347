//! Show event (date of performance) model, DTOs and the public agenda row.

use rouge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `show_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShowEvent {
    pub id: DbId,
    pub show_id: DbId,
    pub venue_id: Option<DbId>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub status: String,
    pub ticket_url: Option<String>,
    pub capacity: Option<i32>,
    pub price_cents: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An event joined with its show and venue for the public agenda.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AgendaEntry {
    pub id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub status: String,
    pub ticket_url: Option<String>,
    pub price_cents: Option<i32>,
    pub show_id: DbId,
    pub show_title: String,
    pub show_slug: String,
    pub show_image_url: Option<String>,
    pub venue_id: Option<DbId>,
    pub venue_name: Option<String>,
    pub venue_city: Option<String>,
}

/// Filters for event listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub show_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShowEvent {
    pub show_id: DbId,
    pub venue_id: Option<DbId>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    /// Defaults to `scheduled`.
    pub status: Option<String>,
    pub ticket_url: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price_cents: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateShowEvent {
    pub venue_id: Option<DbId>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub status: Option<String>,
    pub ticket_url: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price_cents: Option<i32>,
    pub notes: Option<String>,
}
