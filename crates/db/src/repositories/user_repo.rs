//! Repository for the `users` table.

use rouge_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{User, UserResponse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, is_active, invited_at, email_confirmed_at, \
                       last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Users joined with their (optional) profile.
const JOINED_COLUMNS: &str = "u.id, u.email, p.display_name, p.role, u.is_active, u.invited_at, \
                              u.email_confirmed_at, u.last_login_at, u.created_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a password-less user on behalf of an invitation.
    ///
    /// Fails with a `uq_users_email` violation if the email is taken.
    pub async fn create_invited(pool: &PgPool, email: &str) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, invited_at) VALUES (LOWER($1), NOW()) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Insert a user with a known password hash (bootstrap and tests).
    pub async fn create_with_password(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, email_confirmed_at) \
             VALUES (LOWER($1), $2, NOW()) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List every user with profile data, newest first.
    pub async fn list_with_profiles(pool: &PgPool) -> Result<Vec<UserResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM users u \
             LEFT JOIN profiles p ON p.user_id = u.id \
             ORDER BY u.created_at DESC, u.id DESC"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_with_profile(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM users u \
             LEFT JOIN profiles p ON p.user_id = u.id \
             WHERE u.id = $1"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a user. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a user. Profile, sessions and invitations cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a successful login: update timestamp and reset lockout state.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET last_login_at = NOW(), failed_login_count = 0, locked_until = NULL \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Increment the failed login counter and optionally lock the account.
    pub async fn record_failed_login(
        pool: &PgPool,
        id: DbId,
        lock_until: Option<Timestamp>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = failed_login_count + 1, \
                 locked_until = COALESCE($2, locked_until) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(lock_until)
        .execute(pool)
        .await?;
        Ok(())
    }
}
