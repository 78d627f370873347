//! Repository for the `invitations` table.

use rouge_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::Invitation;

const COLUMNS: &str = "id, user_id, token_hash, expires_at, accepted_at, invited_by, \
                       created_at, updated_at";

pub struct InvitationRepo;

impl InvitationRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
        invited_by: Option<DbId>,
    ) -> Result<Invitation, sqlx::Error> {
        let query = format!(
            "INSERT INTO invitations (user_id, token_hash, expires_at, invited_by) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .bind(invited_by)
            .fetch_one(pool)
            .await
    }

    /// Find a pending invitation: not accepted and not expired.
    pub async fn find_pending_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Invitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invitations \
             WHERE token_hash = $1 AND accepted_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Accept an invitation: claim it and set the user's password in one
    /// transaction.
    ///
    /// Returns `false`, with nothing written, when the invitation was
    /// already used, has expired or its user has been deactivated.
    pub async fn accept(
        pool: &PgPool,
        invitation: &Invitation,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed = sqlx::query(
            "UPDATE invitations SET accepted_at = NOW() \
             WHERE id = $1 AND accepted_at IS NULL AND expires_at > NOW()",
        )
        .bind(invitation.id)
        .execute(&mut *tx)
        .await?;
        if claimed.rows_affected() == 0 {
            return Ok(false);
        }

        let updated = sqlx::query(
            "UPDATE users SET password_hash = $2, \
                 email_confirmed_at = COALESCE(email_confirmed_at, NOW()), \
                 failed_login_count = 0, locked_until = NULL \
             WHERE id = $1 AND is_active",
        )
        .bind(invitation.user_id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            // Dropping the transaction releases the claim.
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Expire every pending invitation of a user. Returns how many were
    /// expired.
    pub async fn expire_pending_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE invitations SET expires_at = NOW() \
             WHERE user_id = $1 AND accepted_at IS NULL AND expires_at > NOW()",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
