//! Shared persistence for position-ordered tables.
//!
//! Callers validate the new order with
//! [`rouge_core::reorder::assign_positions`] and hand the result here.

use rouge_core::reorder::PositionUpdate;
use rouge_core::types::DbId;
use sqlx::PgPool;

/// Tables carrying a drag-and-drop `position` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderedTable {
    HeroSlides,
    Partners,
    TeamMembers,
    CompanySections,
}

impl OrderedTable {
    pub fn table_name(self) -> &'static str {
        match self {
            OrderedTable::HeroSlides => "hero_slides",
            OrderedTable::Partners => "partners",
            OrderedTable::TeamMembers => "team_members",
            OrderedTable::CompanySections => "company_sections",
        }
    }
}

/// All ids of `table` in current display order.
pub async fn list_ids(pool: &PgPool, table: OrderedTable) -> Result<Vec<DbId>, sqlx::Error> {
    let query = format!(
        "SELECT id FROM {} ORDER BY position, id",
        table.table_name()
    );
    sqlx::query_scalar::<_, DbId>(&query).fetch_all(pool).await
}

/// Write every position in one transaction.
///
/// If any row is missing or any statement fails the whole batch is rolled
/// back and the stored order is unchanged. Returns the number of rows
/// updated.
pub async fn apply_positions(
    pool: &PgPool,
    table: OrderedTable,
    updates: &[PositionUpdate],
) -> Result<u64, sqlx::Error> {
    let query = format!(
        "UPDATE {} SET position = $2 WHERE id = $1",
        table.table_name()
    );
    let mut tx = pool.begin().await?;
    let mut updated = 0;

    for update in updates {
        let result = sqlx::query(&query)
            .bind(update.id)
            .bind(update.position)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(sqlx::Error::RowNotFound);
        }
        updated += result.rows_affected();
    }

    tx.commit().await?;
    Ok(updated)
}
