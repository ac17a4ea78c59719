//! Repository for the `episodes` table.

use showtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::episode::{epoch_seconds, CreateEpisode, Episode, EpisodeRow, UpdateEpisode};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, season, number, air_date, show_id";

/// Provides CRUD operations for episodes.
pub struct EpisodeRepo;

impl EpisodeRepo {
    /// Insert a new episode, returning the created row. The air date is
    /// truncated to whole epoch seconds on the way in.
    pub async fn create(pool: &PgPool, input: &CreateEpisode) -> Result<Episode, sqlx::Error> {
        let query = format!(
            "INSERT INTO episodes (name, season, number, air_date, show_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(&input.name)
            .bind(input.season)
            .bind(input.number)
            .bind(epoch_seconds(input.air_date))
            .bind(input.show_id)
            .fetch_one(pool)
            .await?;
        Ok(row.into_episode())
    }

    /// Find an episode by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE id = $1");
        let row = sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(EpisodeRow::into_episode))
    }

    /// List all episodes of a show, ordered by season then number.
    pub async fn list_by_show(pool: &PgPool, show_id: DbId) -> Result<Vec<Episode>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM episodes
             WHERE show_id = $1
             ORDER BY season, number"
        );
        let rows = sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(show_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(EpisodeRow::into_episode).collect())
    }

    /// Update an episode. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Re-pointing
    /// `show_id` at a missing show surfaces as a foreign-key violation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEpisode,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!(
            "UPDATE episodes SET
                name = COALESCE($2, name),
                season = COALESCE($3, season),
                number = COALESCE($4, number),
                air_date = COALESCE($5, air_date),
                show_id = COALESCE($6, show_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.season)
            .bind(input.number)
            .bind(input.air_date.map(epoch_seconds))
            .bind(input.show_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(EpisodeRow::into_episode))
    }

    /// Delete an episode. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM episodes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
