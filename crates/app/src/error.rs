//! Error taxonomy for the application layer.
//!
//! One enum per domain area. The adapter layer (see [`crate::adapters`])
//! classifies storage failures exactly once: absent rows become the
//! `NotFound` kinds, SQLSTATE 23505 becomes the already-exists kinds and
//! SQLSTATE 23503 the missing-relation kinds. Anything else stays a
//! `Storage` error that callers treat as an internal failure. Use cases
//! re-raise these errors verbatim and never wrap them.

use showtrack_core::types::{DbId, UserId};
use thiserror::Error;

/// SQLSTATE code raised by PostgreSQL for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE code raised by PostgreSQL for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Returns `true` if `err` is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, UNIQUE_VIOLATION)
}

/// Returns `true` if `err` is a foreign key violation.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    has_sqlstate(err, FOREIGN_KEY_VIOLATION)
}

fn has_sqlstate(err: &sqlx::Error, code: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Actor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("Actor with id {actor_id} not found")]
    NotFound { actor_id: DbId },

    #[error("Actor with id {actor_id} or show with id {show_id} does not exist")]
    ActorOrShowMissing { show_id: DbId, actor_id: DbId },

    #[error("Actor with id {actor_id} is already in the cast of show {show_id}")]
    AlreadyInCast { show_id: DbId, actor_id: DbId },

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Show errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ShowError {
    #[error("Show with id {show_id} not found")]
    NotFound { show_id: DbId },

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Episode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("Episode with id {episode_id} not found")]
    NotFound { episode_id: DbId },

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Schedule errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Show with id {show_id} is already in the schedule of user {user_id}")]
    AlreadyScheduled { user_id: UserId, show_id: DbId },

    #[error("Show with id {show_id} or schedule for user {user_id} does not exist")]
    ShowOrScheduleMissing { user_id: UserId, show_id: DbId },

    #[error("Episode with id {episode_id} is already marked as watched for user {user_id}")]
    AlreadyWatched { user_id: UserId, episode_id: DbId },

    #[error("Episode with id {episode_id} or schedule for user {user_id} does not exist")]
    EpisodeOrScheduleMissing { user_id: UserId, episode_id: DbId },

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Auth errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User with username {username} not found")]
    UserNotFound { username: String },

    #[error("User with username {username} already exists")]
    UserAlreadyExists { username: String },

    #[error("Invalid password for user {username}")]
    InvalidCredentials { username: String },

    /// Practically unreachable with default Argon2 parameters.
    #[error("Failed to hash password: {0}")]
    PasswordHash(argon2::password_hash::Error),

    /// Practically unreachable with HMAC signing algorithms.
    #[error("Failed to issue access token: {0}")]
    TokenIssue(#[from] crate::auth::TokenError),

    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ActorError::NotFound { actor_id: 7 };
        assert_eq!(err.to_string(), "Actor with id 7 not found");

        let err = ScheduleError::AlreadyScheduled {
            user_id: uuid::Uuid::nil(),
            show_id: 3,
        };
        assert!(err.to_string().contains("already in the schedule"));
        assert!(err.to_string().contains("3"));

        let err = AuthError::UserAlreadyExists {
            username: "taken".to_string(),
        };
        assert_eq!(err.to_string(), "User with username taken already exists");
    }

    #[test]
    fn test_non_database_errors_are_not_classified() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));
    }
}
