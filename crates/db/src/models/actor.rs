//! Actor entity model and DTOs.

use serde::{Deserialize, Serialize};
use showtrack_core::types::DbId;
use sqlx::FromRow;

/// Full actor row from the `actors` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub image_url: String,
}

/// DTO for creating a new actor.
#[derive(Debug, Deserialize)]
pub struct CreateActor {
    pub name: String,
    pub image_url: String,
}

/// DTO for updating an existing actor. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateActor {
    pub name: Option<String>,
    pub image_url: Option<String>,
}
