//! Link records for cast membership, schedules, and watched marks.
//!
//! Each pair is unique in its table; uniqueness and referential integrity
//! are enforced by the schema, not re-checked in Rust.

use serde::{Deserialize, Serialize};
use showtrack_core::types::{DbId, UserId};

/// Links an actor to a show's cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMembership {
    pub show_id: DbId,
    pub actor_id: DbId,
}

/// Marks a show as followed in a user's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub user_id: UserId,
    pub show_id: DbId,
}

/// Marks an episode as watched by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedMark {
    pub user_id: UserId,
    pub episode_id: DbId,
}
