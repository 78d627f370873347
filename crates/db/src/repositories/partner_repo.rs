//! Repository for the `partners` table.

use rouge_core::reorder::PositionUpdate;
use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::partner::{CreatePartner, Partner, UpdatePartner};
use crate::repositories::ordering::{self, OrderedTable};

const COLUMNS: &str = "id, name, description, website_url, logo_url, logo_media_id, position, \
                       is_active, created_at, updated_at";

pub struct PartnerRepo;

impl PartnerRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners ORDER BY position, id");
        sqlx::query_as::<_, Partner>(&query).fetch_all(pool).await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners WHERE is_active ORDER BY position, id");
        sqlx::query_as::<_, Partner>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM partners WHERE id = $1");
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a partner at the end of the list.
    pub async fn create(pool: &PgPool, input: &CreatePartner) -> Result<Partner, sqlx::Error> {
        let query = format!(
            "INSERT INTO partners \
                 (name, description, website_url, logo_url, logo_media_id, position, is_active) \
             VALUES ($1, $2, $3, $4, $5, \
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM partners), \
                     COALESCE($6, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.website_url)
            .bind(&input.logo_url)
            .bind(input.logo_media_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePartner,
    ) -> Result<Option<Partner>, sqlx::Error> {
        let query = format!(
            "UPDATE partners SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 website_url = COALESCE($4, website_url), \
                 logo_url = COALESCE($5, logo_url), \
                 logo_media_id = COALESCE($6, logo_media_id), \
                 is_active = COALESCE($7, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.website_url)
            .bind(&input.logo_url)
            .bind(input.logo_media_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        ordering::list_ids(pool, OrderedTable::Partners).await
    }

    pub async fn reorder(pool: &PgPool, updates: &[PositionUpdate]) -> Result<u64, sqlx::Error> {
        ordering::apply_positions(pool, OrderedTable::Partners, updates).await
    }
}
