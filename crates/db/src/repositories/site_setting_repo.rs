//! Repository for the `site_settings` table (display toggles).

use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::site_setting::SiteSetting;

const COLUMNS: &str = "id, key, value, description, category, updated_by, created_at, updated_at";

pub struct SiteSettingRepo;

impl SiteSettingRepo {
    /// List settings ordered by category then key, optionally one category.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<SiteSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_settings \
             WHERE ($1::TEXT IS NULL OR category = $1) \
             ORDER BY category, key"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE key = $1");
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the value of an existing key.
    ///
    /// The new value replaces the old one wholesale, so repeating the same
    /// update leaves the row unchanged apart from `updated_at`.
    pub async fn update_value(
        pool: &PgPool,
        key: &str,
        value: &serde_json::Value,
        updated_by: Option<DbId>,
    ) -> Result<Option<SiteSetting>, sqlx::Error> {
        let query = format!(
            "UPDATE site_settings SET value = $2, updated_by = $3 \
             WHERE key = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(key)
            .bind(value)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }
}
