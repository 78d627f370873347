//! Repository for the `hero_slides` table.

use rouge_core::reorder::PositionUpdate;
use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::hero_slide::{CreateHeroSlide, HeroSlide, UpdateHeroSlide};
use crate::repositories::ordering::{self, OrderedTable};

const COLUMNS: &str = "id, title, subtitle, description, image_url, image_media_id, \
                       cta_label, cta_url, position, is_active, created_at, updated_at";

pub struct HeroSlideRepo;

impl HeroSlideRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<HeroSlide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_slides ORDER BY position, id");
        sqlx::query_as::<_, HeroSlide>(&query).fetch_all(pool).await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<HeroSlide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hero_slides WHERE is_active ORDER BY position, id"
        );
        sqlx::query_as::<_, HeroSlide>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<HeroSlide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_slides WHERE id = $1");
        sqlx::query_as::<_, HeroSlide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a slide at the end of the carousel.
    pub async fn create(pool: &PgPool, input: &CreateHeroSlide) -> Result<HeroSlide, sqlx::Error> {
        let query = format!(
            "INSERT INTO hero_slides \
                 (title, subtitle, description, image_url, image_media_id, \
                  cta_label, cta_url, position, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, \
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM hero_slides), \
                     COALESCE($8, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeroSlide>(&query)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(&input.cta_label)
            .bind(&input.cta_url)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHeroSlide,
    ) -> Result<Option<HeroSlide>, sqlx::Error> {
        let query = format!(
            "UPDATE hero_slides SET \
                 title = COALESCE($2, title), \
                 subtitle = COALESCE($3, subtitle), \
                 description = COALESCE($4, description), \
                 image_url = COALESCE($5, image_url), \
                 image_media_id = COALESCE($6, image_media_id), \
                 cta_label = COALESCE($7, cta_label), \
                 cta_url = COALESCE($8, cta_url), \
                 is_active = COALESCE($9, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeroSlide>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(&input.cta_label)
            .bind(&input.cta_url)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hero_slides WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        ordering::list_ids(pool, OrderedTable::HeroSlides).await
    }

    pub async fn reorder(pool: &PgPool, updates: &[PositionUpdate]) -> Result<u64, sqlx::Error> {
        ordering::apply_positions(pool, OrderedTable::HeroSlides, updates).await
    }
}
