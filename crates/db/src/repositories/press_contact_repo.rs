//! Repository for the `press_contacts` table.

use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::press::{CreatePressContact, PressContact, UpdatePressContact};

const COLUMNS: &str = "id, first_name, last_name, role_title, organization, email, phone, \
                       specialties, notes, is_active, created_at, updated_at";

pub struct PressContactRepo;

impl PressContactRepo {
    /// List contacts alphabetically, optionally only active ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<PressContact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_contacts \
             WHERE (NOT $1 OR is_active) \
             ORDER BY last_name, first_name, id"
        );
        sqlx::query_as::<_, PressContact>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PressContact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_contacts WHERE id = $1");
        sqlx::query_as::<_, PressContact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreatePressContact,
    ) -> Result<PressContact, sqlx::Error> {
        let query = format!(
            "INSERT INTO press_contacts \
                 (first_name, last_name, role_title, organization, email, \
                  phone, specialties, notes, is_active) \
             VALUES ($1, $2, $3, $4, LOWER($5), $6, $7, $8, COALESCE($9, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressContact>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.role_title)
            .bind(&input.organization)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.specialties)
            .bind(&input.notes)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePressContact,
    ) -> Result<Option<PressContact>, sqlx::Error> {
        let query = format!(
            "UPDATE press_contacts SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 role_title = COALESCE($4, role_title), \
                 organization = COALESCE($5, organization), \
                 email = COALESCE(LOWER($6), email), \
                 phone = COALESCE($7, phone), \
                 specialties = COALESCE($8, specialties), \
                 notes = COALESCE($9, notes), \
                 is_active = COALESCE($10, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PressContact>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.role_title)
            .bind(&input.organization)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.specialties)
            .bind(&input.notes)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM press_contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
