//! User entity model and DTOs.

use serde::Deserialize;
use showtrack_core::types::{Timestamp, UserId};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to external output.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    /// Stored role string; parse with
    /// [`showtrack_core::authorization::Role::from_str`] where a typed role
    /// is needed.
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The role is already in its stored string
/// form and the password is already hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}
