//! Repository for the `shows` table.

use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::show::{CreateShow, Show, UpdateShow};

const COLUMNS: &str = "id, title, slug, status, short_description, description, genre, \
                       duration_minutes, casting, premiere_on, image_url, image_media_id, \
                       is_public, created_by, created_at, updated_at";

/// Visibility predicate for the public site.
const PUBLIC_FILTER: &str = "status = 'published' AND is_public";

pub struct ShowRepo;

impl ShowRepo {
    /// List all shows, optionally restricted to one status.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shows \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY premiere_on DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Published public shows, newest premiere first, capped at `limit`.
    pub async fn list_public(pool: &PgPool, limit: i64) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shows WHERE {PUBLIC_FILTER} \
             ORDER BY premiere_on DESC NULLS LAST, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Show>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shows WHERE id = $1");
        sqlx::query_as::<_, Show>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_public_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Show>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shows WHERE slug = $1 AND {PUBLIC_FILTER}");
        sqlx::query_as::<_, Show>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Insert a show. `slug` is resolved by the caller.
    pub async fn create(
        pool: &PgPool,
        input: &CreateShow,
        slug: &str,
        created_by: Option<DbId>,
    ) -> Result<Show, sqlx::Error> {
        let query = format!(
            "INSERT INTO shows \
                 (title, slug, status, short_description, description, genre, duration_minutes, \
                  casting, premiere_on, image_url, image_media_id, is_public, created_by) \
             VALUES ($1, $2, COALESCE($3, 'draft'), $4, $5, $6, $7, $8, $9, \
                     NULLIF(btrim($10), ''), $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.status)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.genre)
            .bind(input.duration_minutes)
            .bind(&input.casting)
            .bind(input.premiere_on)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.is_public)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Partial update. An absent field keeps its value; a blank `image_url`
    /// clears the stored URL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShow,
    ) -> Result<Option<Show>, sqlx::Error> {
        let query = format!(
            "UPDATE shows SET \
                 title = COALESCE($2, title), \
                 slug = COALESCE($3, slug), \
                 status = COALESCE($4, status), \
                 short_description = COALESCE($5, short_description), \
                 description = COALESCE($6, description), \
                 genre = COALESCE($7, genre), \
                 duration_minutes = COALESCE($8, duration_minutes), \
                 casting = COALESCE($9, casting), \
                 premiere_on = COALESCE($10, premiere_on), \
                 image_url = CASE WHEN $11::TEXT IS NULL THEN image_url \
                                  ELSE NULLIF(btrim($11), '') END, \
                 image_media_id = COALESCE($12, image_media_id), \
                 is_public = COALESCE($13, is_public) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.status)
            .bind(&input.short_description)
            .bind(&input.description)
            .bind(&input.genre)
            .bind(input.duration_minutes)
            .bind(&input.casting)
            .bind(input.premiere_on)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Delete a show; its events cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
