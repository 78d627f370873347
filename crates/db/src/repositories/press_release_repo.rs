//! Repository for the `press_releases` table.

use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::press::{CreatePressRelease, PressRelease, UpdatePressRelease};

const COLUMNS: &str = "id, title, slug, description, published_on, image_url, image_media_id, \
                       document_media_id, show_id, event_id, is_public, position, created_by, \
                       created_at, updated_at";

pub struct PressReleaseRepo;

impl PressReleaseRepo {
    /// All releases, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PressRelease>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_releases ORDER BY published_on DESC, id DESC"
        );
        sqlx::query_as::<_, PressRelease>(&query)
            .fetch_all(pool)
            .await
    }

    /// Public releases, most recent first, capped at `limit`.
    pub async fn list_public(pool: &PgPool, limit: i64) -> Result<Vec<PressRelease>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_releases WHERE is_public \
             ORDER BY published_on DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, PressRelease>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PressRelease>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_releases WHERE id = $1");
        sqlx::query_as::<_, PressRelease>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a release. `slug` is resolved by the caller; the public-image
    /// rule is also enforced by `chk_press_releases_public_image`.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePressRelease,
        slug: &str,
        created_by: Option<DbId>,
    ) -> Result<PressRelease, sqlx::Error> {
        let query = format!(
            "INSERT INTO press_releases \
                 (title, slug, description, published_on, image_url, image_media_id, \
                  document_media_id, show_id, event_id, is_public, created_by) \
             VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), NULLIF(btrim($5), ''), \
                     $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressRelease>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(input.published_on)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.document_media_id)
            .bind(input.show_id)
            .bind(input.event_id)
            .bind(input.is_public)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Partial update; a blank `image_url` clears the stored URL.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePressRelease,
    ) -> Result<Option<PressRelease>, sqlx::Error> {
        let query = format!(
            "UPDATE press_releases SET \
                 title = COALESCE($2, title), \
                 slug = COALESCE($3, slug), \
                 description = COALESCE($4, description), \
                 published_on = COALESCE($5, published_on), \
                 image_url = CASE WHEN $6::TEXT IS NULL THEN image_url \
                                  ELSE NULLIF(btrim($6), '') END, \
                 image_media_id = COALESCE($7, image_media_id), \
                 document_media_id = COALESCE($8, document_media_id), \
                 show_id = COALESCE($9, show_id), \
                 event_id = COALESCE($10, event_id), \
                 is_public = COALESCE($11, is_public) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressRelease>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.published_on)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.document_media_id)
            .bind(input.show_id)
            .bind(input.event_id)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM press_releases WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
