//! Repository for the `actors` table and the `cast_members` link table.

use showtrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::actor::{Actor, CreateActor, UpdateActor};
use crate::models::schedule::CastMembership;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image_url";

/// Provides CRUD operations for actors and their cast links.
pub struct ActorRepo;

impl ActorRepo {
    /// Insert a new actor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let query = format!(
            "INSERT INTO actors (name, image_url)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(&input.name)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find an actor by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an actor. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActor,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!(
            "UPDATE actors SET
                name = COALESCE($2, name),
                image_url = COALESCE($3, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an actor. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link an actor to a show's cast.
    ///
    /// A duplicate link or a missing actor/show surfaces as
    /// `sqlx::Error::Database` (unique / foreign-key violation).
    pub async fn add_cast_member(
        pool: &PgPool,
        link: &CastMembership,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO cast_members (show_id, actor_id) VALUES ($1, $2)")
            .bind(link.show_id)
            .bind(link.actor_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Unlink an actor from a show's cast. Returns `true` if the link
    /// existed.
    pub async fn remove_cast_member(
        pool: &PgPool,
        link: &CastMembership,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cast_members WHERE show_id = $1 AND actor_id = $2")
            .bind(link.show_id)
            .bind(link.actor_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
