//! Repository for the `company_sections` table.

use rouge_core::reorder::PositionUpdate;
use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::company_section::{CompanySection, CreateCompanySection, UpdateCompanySection};
use crate::repositories::ordering::{self, OrderedTable};

const COLUMNS: &str = "id, slug, kind, title, content, image_url, image_media_id, position, \
                       is_active, created_at, updated_at";

pub struct CompanySectionRepo;

impl CompanySectionRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<CompanySection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM company_sections ORDER BY position, id");
        sqlx::query_as::<_, CompanySection>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<CompanySection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM company_sections WHERE is_active ORDER BY position, id"
        );
        sqlx::query_as::<_, CompanySection>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CompanySection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM company_sections WHERE id = $1");
        sqlx::query_as::<_, CompanySection>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a section at the end of the page. `slug` is resolved by the caller.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCompanySection,
        slug: &str,
    ) -> Result<CompanySection, sqlx::Error> {
        let query = format!(
            "INSERT INTO company_sections \
                 (slug, kind, title, content, image_url, image_media_id, position, is_active) \
             VALUES ($1, COALESCE($2, 'text'), $3, $4, $5, $6, \
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM company_sections), \
                     COALESCE($7, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompanySection>(&query)
            .bind(slug)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompanySection,
    ) -> Result<Option<CompanySection>, sqlx::Error> {
        let query = format!(
            "UPDATE company_sections SET \
                 slug = COALESCE($2, slug), \
                 kind = COALESCE($3, kind), \
                 title = COALESCE($4, title), \
                 content = COALESCE($5, content), \
                 image_url = COALESCE($6, image_url), \
                 image_media_id = COALESCE($7, image_media_id), \
                 is_active = COALESCE($8, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CompanySection>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.kind)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM company_sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        ordering::list_ids(pool, OrderedTable::CompanySections).await
    }

    pub async fn reorder(pool: &PgPool, updates: &[PositionUpdate]) -> Result<u64, sqlx::Error> {
        ordering::apply_positions(pool, OrderedTable::CompanySections, updates).await
    }
}
