//! Show entity model, the show x cast join row, and DTOs.

use serde::{Deserialize, Serialize};
use showtrack_core::types::DbId;
use sqlx::FromRow;

use crate::models::actor::Actor;

/// Show aggregate: scalar columns from the `shows` table plus the cast
/// reconstructed from the `cast_members` join.
///
/// Built by [`crate::grouping`] from [`ShowCastRow`] sequences; never read
/// directly from a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: DbId,
    pub name: String,
    pub seasons_count: i32,
    pub image_url: String,
    /// Actors currently linked via `cast_members`, in row order.
    pub cast: Vec<Actor>,
}

/// One flat row of the show x cast-member join.
///
/// The queries producing these order by `show_id` so that rows belonging to
/// one show are contiguous, which is what the grouping pass relies on.
#[derive(Debug, Clone, FromRow)]
pub struct ShowCastRow {
    pub show_id: DbId,
    pub show_name: String,
    pub seasons_count: i32,
    pub image_url: String,
    pub actor_id: DbId,
    pub actor_name: String,
    pub actor_image_url: String,
}

impl ShowCastRow {
    /// Extract the actor sub-fields as an [`Actor`] value.
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.actor_id,
            name: self.actor_name.clone(),
            image_url: self.actor_image_url.clone(),
        }
    }
}

/// Scalar show row, used by the write paths which have no cast to attach.
#[derive(Debug, Clone, FromRow)]
pub struct ShowRow {
    pub id: DbId,
    pub name: String,
    pub seasons_count: i32,
    pub image_url: String,
}

impl ShowRow {
    /// Promote the scalar row to a [`Show`] with the given cast.
    pub fn into_show(self, cast: Vec<Actor>) -> Show {
        Show {
            id: self.id,
            name: self.name,
            seasons_count: self.seasons_count,
            image_url: self.image_url,
            cast,
        }
    }
}

/// DTO for creating a new show.
#[derive(Debug, Deserialize)]
pub struct CreateShow {
    pub name: String,
    pub seasons_count: i32,
    pub image_url: String,
}

/// DTO for updating an existing show. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateShow {
    pub name: Option<String>,
    pub seasons_count: Option<i32>,
    pub image_url: Option<String>,
}
