//! Repository for the `profiles` table.

use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::Profile;

const COLUMNS: &str = "id, user_id, display_name, role, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert or replace the profile of `user_id`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        display_name: Option<&str>,
        role: &str,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, display_name, role) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 display_name = EXCLUDED.display_name, \
                 role = EXCLUDED.role \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(display_name)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update display name and role.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        display_name: Option<&str>,
        role: Option<&str>,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET \
                 display_name = COALESCE($2, display_name), \
                 role = COALESCE($3, role) \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(display_name)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_by_user_id(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
