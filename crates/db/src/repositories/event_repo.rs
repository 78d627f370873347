//! Repository for the `show_events` table and the public agenda.

use rouge_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::event::{AgendaEntry, CreateShowEvent, EventFilter, ShowEvent, UpdateShowEvent};

const COLUMNS: &str = "id, show_id, venue_id, starts_at, ends_at, status, ticket_url, \
                       capacity, price_cents, notes, created_at, updated_at";

pub struct EventRepo;

impl EventRepo {
    /// List events in chronological order, filtered by show and time window.
    pub async fn list(pool: &PgPool, filter: &EventFilter) -> Result<Vec<ShowEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM show_events \
             WHERE ($1::BIGINT IS NULL OR show_id = $1) \
               AND ($2::TIMESTAMPTZ IS NULL OR starts_at >= $2) \
               AND ($3::TIMESTAMPTZ IS NULL OR starts_at < $3) \
             ORDER BY starts_at, id"
        );
        sqlx::query_as::<_, ShowEvent>(&query)
            .bind(filter.show_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(pool)
            .await
    }

    /// Events of one show starting at or after `from`.
    pub async fn list_upcoming_for_show(
        pool: &PgPool,
        show_id: DbId,
        from: Timestamp,
    ) -> Result<Vec<ShowEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM show_events \
             WHERE show_id = $1 AND starts_at >= $2 \
             ORDER BY starts_at, id"
        );
        sqlx::query_as::<_, ShowEvent>(&query)
            .bind(show_id)
            .bind(from)
            .fetch_all(pool)
            .await
    }

    /// Public agenda: events of published public shows within the window,
    /// joined with show and venue labels.
    pub async fn agenda(
        pool: &PgPool,
        from: Timestamp,
        to: Option<Timestamp>,
        show_id: Option<DbId>,
    ) -> Result<Vec<AgendaEntry>, sqlx::Error> {
        sqlx::query_as::<_, AgendaEntry>(
            "SELECT e.id, e.starts_at, e.ends_at, e.status, e.ticket_url, e.price_cents, \
                    s.id AS show_id, s.title AS show_title, s.slug AS show_slug, \
                    s.image_url AS show_image_url, \
                    v.id AS venue_id, v.name AS venue_name, v.city AS venue_city \
             FROM show_events e \
             JOIN shows s ON s.id = e.show_id \
             LEFT JOIN venues v ON v.id = e.venue_id \
             WHERE s.status = 'published' AND s.is_public \
               AND e.starts_at >= $1 \
               AND ($2::TIMESTAMPTZ IS NULL OR e.starts_at < $2) \
               AND ($3::BIGINT IS NULL OR e.show_id = $3) \
             ORDER BY e.starts_at, e.id",
        )
        .bind(from)
        .bind(to)
        .bind(show_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ShowEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM show_events WHERE id = $1");
        sqlx::query_as::<_, ShowEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateShowEvent) -> Result<ShowEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO show_events \
                 (show_id, venue_id, starts_at, ends_at, status, \
                  ticket_url, capacity, price_cents, notes) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'scheduled'), $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShowEvent>(&query)
            .bind(input.show_id)
            .bind(input.venue_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.status)
            .bind(&input.ticket_url)
            .bind(input.capacity)
            .bind(input.price_cents)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShowEvent,
    ) -> Result<Option<ShowEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE show_events SET \
                 venue_id = COALESCE($2, venue_id), \
                 starts_at = COALESCE($3, starts_at), \
                 ends_at = COALESCE($4, ends_at), \
                 status = COALESCE($5, status), \
                 ticket_url = COALESCE($6, ticket_url), \
                 capacity = COALESCE($7, capacity), \
                 price_cents = COALESCE($8, price_cents), \
                 notes = COALESCE($9, notes) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShowEvent>(&query)
            .bind(id)
            .bind(input.venue_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.status)
            .bind(&input.ticket_url)
            .bind(input.capacity)
            .bind(input.price_cents)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM show_events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
