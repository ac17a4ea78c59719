//! Repository for per-user schedules: followed shows and watched marks.

use showtrack_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::grouping::group_into_shows;
use crate::models::episode::{Episode, EpisodeRow};
use crate::models::schedule::{ScheduleEntry, WatchedMark};
use crate::models::show::{Show, ShowCastRow};

/// Aliased column list for the show x cast join, matching [`ShowCastRow`].
const JOIN_COLUMNS: &str = "s.id AS show_id, s.name AS show_name, s.seasons_count, \
                            s.image_url, a.id AS actor_id, a.name AS actor_name, \
                            a.image_url AS actor_image_url";

/// Episode column list, qualified for joined queries.
const EPISODE_COLUMNS: &str = "e.id, e.name, e.season, e.number, e.air_date, e.show_id";

/// Provides schedule and watched-mark operations.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Add a show to a user's schedule.
    ///
    /// A duplicate entry or a missing show/user surfaces as
    /// `sqlx::Error::Database` (unique / foreign-key violation).
    pub async fn add_show(pool: &PgPool, entry: &ScheduleEntry) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO schedule_entries (user_id, show_id) VALUES ($1, $2)")
            .bind(entry.user_id)
            .bind(entry.show_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove a show from a user's schedule. Returns `true` if the entry
    /// existed.
    pub async fn remove_show(pool: &PgPool, entry: &ScheduleEntry) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM schedule_entries WHERE user_id = $1 AND show_id = $2")
            .bind(entry.user_id)
            .bind(entry.show_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the shows in a user's schedule, with casts.
    ///
    /// `limit` and `offset` apply to the underlying join rows, not to
    /// distinct shows; `None` means unbounded.
    pub async fn list_shows(
        pool: &PgPool,
        user_id: UserId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM shows s
             JOIN cast_members cm ON cm.show_id = s.id
             JOIN actors a ON a.id = cm.actor_id
             JOIN schedule_entries se ON se.show_id = s.id
             WHERE se.user_id = $1
             ORDER BY s.id, a.id
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ShowCastRow>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(group_into_shows(rows))
    }

    /// Suggest shows for a user: every show sharing at least one cast
    /// member with any show in the user's schedule, full cast attached.
    ///
    /// Shows already in the schedule are not excluded.
    pub async fn suggested_shows(pool: &PgPool, user_id: UserId) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS}
             FROM shows s
             JOIN cast_members cm ON cm.show_id = s.id
             JOIN actors a ON a.id = cm.actor_id
             WHERE s.id IN (
                 SELECT shared.show_id
                 FROM cast_members shared
                 WHERE shared.actor_id IN (
                     SELECT cm2.actor_id
                     FROM schedule_entries se
                     JOIN cast_members cm2 ON cm2.show_id = se.show_id
                     WHERE se.user_id = $1
                 )
             )
             ORDER BY s.id, a.id"
        );
        let rows = sqlx::query_as::<_, ShowCastRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(group_into_shows(rows))
    }

    /// Mark an episode as watched by a user.
    ///
    /// A duplicate mark or a missing episode/user surfaces as
    /// `sqlx::Error::Database` (unique / foreign-key violation).
    pub async fn mark_watched(pool: &PgPool, mark: &WatchedMark) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO watched_episodes (user_id, episode_id) VALUES ($1, $2)")
            .bind(mark.user_id)
            .bind(mark.episode_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove a watched mark. Returns `true` if the mark existed.
    pub async fn mark_unwatched(pool: &PgPool, mark: &WatchedMark) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM watched_episodes WHERE user_id = $1 AND episode_id = $2")
            .bind(mark.user_id)
            .bind(mark.episode_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// For each show in the user's schedule, the lowest (season, number)
    /// episode the user has not watched. Shows with every episode watched
    /// contribute nothing.
    pub async fn first_unwatched(pool: &PgPool, user_id: UserId) -> Result<Vec<Episode>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (e.show_id) {EPISODE_COLUMNS}
             FROM episodes e
             JOIN schedule_entries se ON se.show_id = e.show_id
             WHERE se.user_id = $1
               AND NOT EXISTS (
                   SELECT 1 FROM watched_episodes we
                   WHERE we.user_id = $1 AND we.episode_id = e.id
               )
             ORDER BY e.show_id, e.season, e.number"
        );
        let rows = sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(EpisodeRow::into_episode).collect())
    }
}
