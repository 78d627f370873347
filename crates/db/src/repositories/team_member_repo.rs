//! Repository for the `team_members` table.

use rouge_core::reorder::PositionUpdate;
use rouge_core::types::DbId;
use sqlx::PgPool;

use crate::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use crate::repositories::ordering::{self, OrderedTable};

const COLUMNS: &str = "id, name, role_title, bio, image_url, image_media_id, position, \
                       is_active, created_at, updated_at";

pub struct TeamMemberRepo;

impl TeamMemberRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members ORDER BY position, id");
        sqlx::query_as::<_, TeamMember>(&query).fetch_all(pool).await
    }

    pub async fn list_active(pool: &PgPool) -> Result<Vec<TeamMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM team_members WHERE is_active ORDER BY position, id"
        );
        sqlx::query_as::<_, TeamMember>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM team_members WHERE id = $1");
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a member at the end of the list.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO team_members \
                 (name, role_title, bio, image_url, image_media_id, position, is_active) \
             VALUES ($1, $2, $3, $4, $5, \
                     (SELECT COALESCE(MAX(position) + 1, 0) FROM team_members), \
                     COALESCE($6, true)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(&input.name)
            .bind(&input.role_title)
            .bind(&input.bio)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeamMember,
    ) -> Result<Option<TeamMember>, sqlx::Error> {
        let query = format!(
            "UPDATE team_members SET \
                 name = COALESCE($2, name), \
                 role_title = COALESCE($3, role_title), \
                 bio = COALESCE($4, bio), \
                 image_url = COALESCE($5, image_url), \
                 image_media_id = COALESCE($6, image_media_id), \
                 is_active = COALESCE($7, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TeamMember>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role_title)
            .bind(&input.bio)
            .bind(&input.image_url)
            .bind(input.image_media_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        ordering::list_ids(pool, OrderedTable::TeamMembers).await
    }

    pub async fn reorder(pool: &PgPool, updates: &[PositionUpdate]) -> Result<u64, sqlx::Error> {
        ordering::apply_positions(pool, OrderedTable::TeamMembers, updates).await
    }
}
