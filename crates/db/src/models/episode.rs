//! Episode entity model and DTOs.
//!
//! Air dates are stored as whole epoch seconds in a BIGINT column, so
//! sub-second precision is lost on round-trip.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use showtrack_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// TV-show episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub id: DbId,
    pub name: String,
    pub season: i32,
    pub number: i32,
    pub air_date: Timestamp,
    pub show_id: DbId,
}

/// Full episode row from the `episodes` table, air date still in epoch
/// seconds.
#[derive(Debug, Clone, FromRow)]
pub struct EpisodeRow {
    pub id: DbId,
    pub name: String,
    pub season: i32,
    pub number: i32,
    pub air_date: i64,
    pub show_id: DbId,
}

impl EpisodeRow {
    /// Convert the stored epoch seconds back to a UTC timestamp.
    ///
    /// Out-of-range values clamp to the epoch rather than failing; the
    /// column only ever holds what [`epoch_seconds`] produced.
    pub fn into_episode(self) -> Episode {
        Episode {
            id: self.id,
            name: self.name,
            season: self.season,
            number: self.number,
            air_date: DateTime::from_timestamp(self.air_date, 0).unwrap_or(DateTime::UNIX_EPOCH),
            show_id: self.show_id,
        }
    }
}

/// Truncate a timestamp to the whole epoch seconds the column stores.
pub fn epoch_seconds(at: Timestamp) -> i64 {
    at.timestamp()
}

/// DTO for creating a new episode.
#[derive(Debug, Deserialize)]
pub struct CreateEpisode {
    pub name: String,
    pub season: i32,
    pub number: i32,
    pub air_date: Timestamp,
    pub show_id: DbId,
}

/// DTO for updating an existing episode. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEpisode {
    pub name: Option<String>,
    pub season: Option<i32>,
    pub number: Option<i32>,
    pub air_date: Option<Timestamp>,
    pub show_id: Option<DbId>,
}
