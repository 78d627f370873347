//! Repositories for the media library: items, folders and tags.

use std::collections::HashMap;

use rouge_core::types::DbId;
use sqlx::{FromRow, PgPool};

use crate::models::media::{
    CreateMediaFolder, CreateMediaItem, CreateMediaTag, MediaFilter, MediaFolder, MediaItem,
    MediaTag, UpdateMediaFolder, UpdateMediaItem, UpdateMediaTag,
};

const ITEM_COLUMNS: &str = "id, storage_path, original_filename, mime_type, size_bytes, width, \
                            height, alt_text, folder_id, uploaded_by, created_at, updated_at";

const FOLDER_COLUMNS: &str = "id, name, slug, parent_id, created_at, updated_at";

const TAG_COLUMNS: &str = "id, name, slug, color, created_at, updated_at";

/// A tag together with the item it is attached to.
#[derive(FromRow)]
struct TaggedRow {
    media_id: DbId,
    #[sqlx(flatten)]
    tag: MediaTag,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

pub struct MediaRepo;

impl MediaRepo {
    /// List items newest first with folder, tag and text filters.
    pub async fn list(
        pool: &PgPool,
        filter: &MediaFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM media_items m \
             WHERE ($1::BIGINT IS NULL OR m.folder_id = $1) \
               AND ($2::BIGINT IS NULL OR EXISTS ( \
                     SELECT 1 FROM media_item_tags t WHERE t.media_id = m.id AND t.tag_id = $2)) \
               AND ($3::TEXT IS NULL \
                    OR m.original_filename ILIKE '%' || $3 || '%' \
                    OR m.alt_text ILIKE '%' || $3 || '%') \
             ORDER BY m.created_at DESC, m.id DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(filter.folder_id)
            .bind(filter.tag_id)
            .bind(filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM media_items WHERE id = $1");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateMediaItem) -> Result<MediaItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_items \
                 (storage_path, original_filename, mime_type, size_bytes, width, height, \
                  alt_text, folder_id, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(&input.storage_path)
            .bind(&input.original_filename)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .bind(input.width)
            .bind(input.height)
            .bind(&input.alt_text)
            .bind(input.folder_id)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaItem,
    ) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!(
            "UPDATE media_items SET \
                 alt_text = COALESCE($2, alt_text), \
                 folder_id = COALESCE($3, folder_id) \
             WHERE id = $1 \
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .bind(&input.alt_text)
            .bind(input.folder_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the row and return it so the caller can remove the object.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<MediaItem>, sqlx::Error> {
        let query = format!("DELETE FROM media_items WHERE id = $1 RETURNING {ITEM_COLUMNS}");
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tags attached to each of `media_ids`, keyed by item id.
    pub async fn tags_for(
        pool: &PgPool,
        media_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<MediaTag>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TaggedRow>(
            "SELECT it.media_id, t.id, t.name, t.slug, t.color, t.created_at, t.updated_at \
             FROM media_item_tags it \
             JOIN media_tags t ON t.id = it.tag_id \
             WHERE it.media_id = ANY($1) \
             ORDER BY t.name",
        )
        .bind(media_ids)
        .fetch_all(pool)
        .await?;

        let mut by_item: HashMap<DbId, Vec<MediaTag>> = HashMap::new();
        for row in rows {
            by_item.entry(row.media_id).or_default().push(row.tag);
        }
        Ok(by_item)
    }

    /// Replace the tag set of an item in one transaction.
    pub async fn set_tags(
        pool: &PgPool,
        media_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM media_item_tags WHERE media_id = $1")
            .bind(media_id)
            .execute(&mut *tx)
            .await?;

        for &tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO media_item_tags (media_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT (media_id, tag_id) DO NOTHING",
            )
            .bind(media_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Whether any content row still points at this item.
    pub async fn is_referenced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM shows WHERE image_media_id = $1) \
                 OR EXISTS (SELECT 1 FROM press_releases \
                            WHERE image_media_id = $1 OR document_media_id = $1) \
                 OR EXISTS (SELECT 1 FROM hero_slides WHERE image_media_id = $1) \
                 OR EXISTS (SELECT 1 FROM team_members WHERE image_media_id = $1) \
                 OR EXISTS (SELECT 1 FROM partners WHERE logo_media_id = $1) \
                 OR EXISTS (SELECT 1 FROM company_sections WHERE image_media_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Folders
// ---------------------------------------------------------------------------

pub struct MediaFolderRepo;

impl MediaFolderRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<MediaFolder>, sqlx::Error> {
        let query = format!("SELECT {FOLDER_COLUMNS} FROM media_folders ORDER BY name, id");
        sqlx::query_as::<_, MediaFolder>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaFolder>, sqlx::Error> {
        let query = format!("SELECT {FOLDER_COLUMNS} FROM media_folders WHERE id = $1");
        sqlx::query_as::<_, MediaFolder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaFolder,
        slug: &str,
    ) -> Result<MediaFolder, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_folders (name, slug, parent_id) VALUES ($1, $2, $3) \
             RETURNING {FOLDER_COLUMNS}"
        );
        sqlx::query_as::<_, MediaFolder>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaFolder,
    ) -> Result<Option<MediaFolder>, sqlx::Error> {
        let query = format!(
            "UPDATE media_folders SET \
                 name = COALESCE($2, name), \
                 slug = COALESCE($3, slug), \
                 parent_id = COALESCE($4, parent_id) \
             WHERE id = $1 \
             RETURNING {FOLDER_COLUMNS}"
        );
        sqlx::query_as::<_, MediaFolder>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.parent_id)
            .fetch_optional(pool)
            .await
    }

    /// Items in the folder are kept with `folder_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_folders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

pub struct MediaTagRepo;

impl MediaTagRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<MediaTag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM media_tags ORDER BY name, id");
        sqlx::query_as::<_, MediaTag>(&query).fetch_all(pool).await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateMediaTag,
        slug: &str,
    ) -> Result<MediaTag, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_tags (name, slug, color) VALUES ($1, $2, $3) \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, MediaTag>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaTag,
    ) -> Result<Option<MediaTag>, sqlx::Error> {
        let query = format!(
            "UPDATE media_tags SET \
                 name = COALESCE($2, name), \
                 slug = COALESCE($3, slug), \
                 color = COALESCE($4, color) \
             WHERE id = $1 \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, MediaTag>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
