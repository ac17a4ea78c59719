//! Repository for the `shows` table.
//!
//! The read paths join through `cast_members` so every show comes back with
//! its cast attached. A show with no cast links produces no join rows and is
//! therefore invisible to `find_by_id` and `list`; that is the row-source
//! policy, not an error here.

use showtrack_core::types::DbId;
use sqlx::PgPool;

use crate::grouping::{collect_single_show, group_into_shows};
use crate::models::actor::Actor;
use crate::models::show::{CreateShow, Show, ShowCastRow, ShowRow, UpdateShow};

/// Scalar column list for the write paths.
const COLUMNS: &str = "id, name, seasons_count, image_url";

/// Aliased column list for the show x cast join, matching [`ShowCastRow`].
const JOIN_COLUMNS: &str = "s.id AS show_id, s.name AS show_name, s.seasons_count, \
                            s.image_url, a.id AS actor_id, a.name AS actor_name, \
                            a.image_url AS actor_image_url";

/// Provides CRUD operations for shows.
pub struct ShowRepo;

impl ShowRepo {
    /// Insert a new show, returning the created row. A new show has no cast
    /// links yet, so its cast is empty.
    pub async fn create(pool: &PgPool, input: &CreateShow) -> Result<Show, sqlx::Error> {
        let query = format!(
            "INSERT INTO shows (name, seasons_count, image_url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ShowRow>(&query)
            .bind(&input.name)
            .bind(input.seasons_count)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await?;
        Ok(row.into_show(Vec::new()))
    }

    /// Find a show with its cast by ID.
    ///
    /// Returns `None` when no join row matches, which covers both a missing
    /// show and a show without cast links.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM shows s
             JOIN cast_members cm ON cm.show_id = s.id
             JOIN actors a ON a.id = cm.actor_id
             WHERE s.id = $1
             ORDER BY a.id"
        );
        let rows = sqlx::query_as::<_, ShowCastRow>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(collect_single_show(rows))
    }

    /// List shows with their casts.
    ///
    /// `limit` and `offset` apply to the underlying join rows, not to
    /// distinct shows; `None` means unbounded. Ordering by `s.id` keeps the
    /// rows of one show contiguous for the grouping pass.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM shows s
             JOIN cast_members cm ON cm.show_id = s.id
             JOIN actors a ON a.id = cm.actor_id
             ORDER BY s.id, a.id
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ShowCastRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(group_into_shows(rows))
    }

    /// Update a show's scalar fields. Only non-`None` fields in `input`
    /// are applied; the cast is untouched and re-fetched for the result.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShow,
    ) -> Result<Option<Show>, sqlx::Error> {
        let query = format!(
            "UPDATE shows SET
                name = COALESCE($2, name),
                seasons_count = COALESCE($3, seasons_count),
                image_url = COALESCE($4, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ShowRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.seasons_count)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => {
                let cast = Self::fetch_cast(pool, id).await?;
                Ok(Some(row.into_show(cast)))
            }
            None => Ok(None),
        }
    }

    /// Delete a show. Returns `true` if a row was removed. Episodes and
    /// link rows go with it via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Current cast of a show, ordered by actor id.
    async fn fetch_cast(pool: &PgPool, show_id: DbId) -> Result<Vec<Actor>, sqlx::Error> {
        sqlx::query_as::<_, Actor>(
            "SELECT a.id, a.name, a.image_url
             FROM actors a
             JOIN cast_members cm ON cm.actor_id = a.id
             WHERE cm.show_id = $1
             ORDER BY a.id",
        )
        .bind(show_id)
        .fetch_all(pool)
        .await
    }
}
