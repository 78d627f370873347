//! Repository for the `press_articles` table.

use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::press::{CreatePressArticle, PressArticle, UpdatePressArticle};

const COLUMNS: &str = "id, title, author, kind, lead, excerpt, source_publication, source_url, \
                       published_on, created_at, updated_at";

pub struct PressArticleRepo;

impl PressArticleRepo {
    /// Articles, most recent first, capped at `limit`.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<PressArticle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_articles \
             ORDER BY published_on DESC NULLS LAST, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, PressArticle>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PressArticle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_articles WHERE id = $1");
        sqlx::query_as::<_, PressArticle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreatePressArticle,
    ) -> Result<PressArticle, sqlx::Error> {
        let query = format!(
            "INSERT INTO press_articles \
                 (title, author, kind, lead, \
                  excerpt, source_publication, source_url, published_on) \
             VALUES ($1, $2, COALESCE($3, 'article'), $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressArticle>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.kind)
            .bind(&input.lead)
            .bind(&input.excerpt)
            .bind(&input.source_publication)
            .bind(&input.source_url)
            .bind(input.published_on)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePressArticle,
    ) -> Result<Option<PressArticle>, sqlx::Error> {
        let query = format!(
            "UPDATE press_articles SET \
                 title = COALESCE($2, title), \
                 author = COALESCE($3, author), \
                 kind = COALESCE($4, kind), \
                 lead = COALESCE($5, lead), \
                 excerpt = COALESCE($6, excerpt), \
                 source_publication = COALESCE($7, source_publication), \
                 source_url = COALESCE($8, source_url), \
                 published_on = COALESCE($9, published_on) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressArticle>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.kind)
            .bind(&input.lead)
            .bind(&input.excerpt)
            .bind(&input.source_publication)
            .bind(&input.source_url)
            .bind(input.published_on)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM press_articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
