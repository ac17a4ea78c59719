//! Postgres-backed implementations of the use-case storage capabilities.
//!
//! Each adapter wraps a connection pool and translates raw storage outcomes
//! into the error taxonomy exactly once, following the rules described in
//! [`crate::error`]. Use cases above this layer never see `sqlx` details
//! beyond the opaque `Storage` variant.

use async_trait::async_trait;
use showtrack_core::types::{DbId, UserId};
use showtrack_db::models::actor::{Actor, CreateActor, UpdateActor};
use showtrack_db::models::episode::{CreateEpisode, Episode, UpdateEpisode};
use showtrack_db::models::schedule::{CastMembership, ScheduleEntry, WatchedMark};
use showtrack_db::models::show::{CreateShow, Show, UpdateShow};
use showtrack_db::models::user::{CreateUser, User};
use showtrack_db::repositories::{ActorRepo, EpisodeRepo, ScheduleRepo, ShowRepo, UserRepo};
use sqlx::PgPool;

use crate::error::{
    is_foreign_key_violation, is_unique_violation, ActorError, AuthError, EpisodeError,
    ScheduleError, ShowError,
};
use crate::use_cases::actors::{
    AddActorRepo, AddCastMemberRepo, DeleteActorRepo, GetActorRepo, RemoveCastMemberRepo,
    UpdateActorRepo,
};
use crate::use_cases::auth::{AddUserRepo, GetUserByUsernameRepo};
use crate::use_cases::episodes::{
    AddEpisodeRepo, DeleteEpisodeRepo, GetEpisodeRepo, ListEpisodesRepo, UpdateEpisodeRepo,
};
use crate::use_cases::schedule::{
    AddShowToScheduleRepo, ListFirstUnwatchedRepo, ListScheduledShowsRepo,
    MarkEpisodeUnwatchedRepo, MarkEpisodeWatchedRepo, RemoveShowFromScheduleRepo, SuggestShowsRepo,
};
use crate::use_cases::shows::{
    AddShowRepo, DeleteShowRepo, GetShowRepo, ListShowsRepo, UpdateShowRepo,
};

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// Actor storage backed by Postgres.
pub struct PgActorRepo {
    pool: PgPool,
}

impl PgActorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddActorRepo for PgActorRepo {
    async fn create(&self, input: &CreateActor) -> Result<Actor, ActorError> {
        Ok(ActorRepo::create(&self.pool, input).await?)
    }
}

#[async_trait]
impl GetActorRepo for PgActorRepo {
    async fn find_by_id(&self, actor_id: DbId) -> Result<Actor, ActorError> {
        ActorRepo::find_by_id(&self.pool, actor_id)
            .await?
            .ok_or(ActorError::NotFound { actor_id })
    }
}

#[async_trait]
impl UpdateActorRepo for PgActorRepo {
    async fn update(&self, actor_id: DbId, input: &UpdateActor) -> Result<Actor, ActorError> {
        ActorRepo::update(&self.pool, actor_id, input)
            .await?
            .ok_or(ActorError::NotFound { actor_id })
    }
}

#[async_trait]
impl DeleteActorRepo for PgActorRepo {
    async fn delete(&self, actor_id: DbId) -> Result<(), ActorError> {
        ActorRepo::delete(&self.pool, actor_id).await?;
        Ok(())
    }
}

#[async_trait]
impl AddCastMemberRepo for PgActorRepo {
    async fn add_cast_member(&self, link: &CastMembership) -> Result<(), ActorError> {
        let CastMembership { show_id, actor_id } = *link;
        match ActorRepo::add_cast_member(&self.pool, link).await {
            Ok(()) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(ActorError::AlreadyInCast { show_id, actor_id })
            }
            Err(err) if is_foreign_key_violation(&err) => {
                Err(ActorError::ActorOrShowMissing { show_id, actor_id })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl RemoveCastMemberRepo for PgActorRepo {
    async fn remove_cast_member(&self, link: &CastMembership) -> Result<(), ActorError> {
        ActorRepo::remove_cast_member(&self.pool, link).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shows
// ---------------------------------------------------------------------------

/// Show storage backed by Postgres.
pub struct PgShowRepo {
    pool: PgPool,
}

impl PgShowRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddShowRepo for PgShowRepo {
    async fn create(&self, input: &CreateShow) -> Result<Show, ShowError> {
        Ok(ShowRepo::create(&self.pool, input).await?)
    }
}

#[async_trait]
impl GetShowRepo for PgShowRepo {
    async fn find_by_id(&self, show_id: DbId) -> Result<Show, ShowError> {
        ShowRepo::find_by_id(&self.pool, show_id)
            .await?
            .ok_or(ShowError::NotFound { show_id })
    }
}

#[async_trait]
impl ListShowsRepo for PgShowRepo {
    async fn list(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<Show>, ShowError> {
        Ok(ShowRepo::list(&self.pool, limit, offset).await?)
    }
}

#[async_trait]
impl UpdateShowRepo for PgShowRepo {
    async fn update(&self, show_id: DbId, input: &UpdateShow) -> Result<Show, ShowError> {
        ShowRepo::update(&self.pool, show_id, input)
            .await?
            .ok_or(ShowError::NotFound { show_id })
    }
}

#[async_trait]
impl DeleteShowRepo for PgShowRepo {
    async fn delete(&self, show_id: DbId) -> Result<(), ShowError> {
        ShowRepo::delete(&self.pool, show_id).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Episodes
// ---------------------------------------------------------------------------

/// Episode storage backed by Postgres.
pub struct PgEpisodeRepo {
    pool: PgPool,
}

impl PgEpisodeRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddEpisodeRepo for PgEpisodeRepo {
    async fn create(&self, input: &CreateEpisode) -> Result<Episode, EpisodeError> {
        Ok(EpisodeRepo::create(&self.pool, input).await?)
    }
}

#[async_trait]
impl GetEpisodeRepo for PgEpisodeRepo {
    async fn find_by_id(&self, episode_id: DbId) -> Result<Episode, EpisodeError> {
        EpisodeRepo::find_by_id(&self.pool, episode_id)
            .await?
            .ok_or(EpisodeError::NotFound { episode_id })
    }
}

#[async_trait]
impl ListEpisodesRepo for PgEpisodeRepo {
    async fn list_by_show(&self, show_id: DbId) -> Result<Vec<Episode>, EpisodeError> {
        Ok(EpisodeRepo::list_by_show(&self.pool, show_id).await?)
    }
}

#[async_trait]
impl UpdateEpisodeRepo for PgEpisodeRepo {
    async fn update(
        &self,
        episode_id: DbId,
        input: &UpdateEpisode,
    ) -> Result<Episode, EpisodeError> {
        EpisodeRepo::update(&self.pool, episode_id, input)
            .await?
            .ok_or(EpisodeError::NotFound { episode_id })
    }
}

#[async_trait]
impl DeleteEpisodeRepo for PgEpisodeRepo {
    async fn delete(&self, episode_id: DbId) -> Result<(), EpisodeError> {
        EpisodeRepo::delete(&self.pool, episode_id).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Schedule and watch-state storage backed by Postgres.
pub struct PgScheduleRepo {
    pool: PgPool,
}

impl PgScheduleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddShowToScheduleRepo for PgScheduleRepo {
    async fn add_show(&self, entry: &ScheduleEntry) -> Result<(), ScheduleError> {
        let ScheduleEntry { user_id, show_id } = *entry;
        match ScheduleRepo::add_show(&self.pool, entry).await {
            Ok(()) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(ScheduleError::AlreadyScheduled { user_id, show_id })
            }
            Err(err) if is_foreign_key_violation(&err) => {
                Err(ScheduleError::ShowOrScheduleMissing { user_id, show_id })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl RemoveShowFromScheduleRepo for PgScheduleRepo {
    async fn remove_show(&self, entry: &ScheduleEntry) -> Result<(), ScheduleError> {
        ScheduleRepo::remove_show(&self.pool, entry).await?;
        Ok(())
    }
}

#[async_trait]
impl ListScheduledShowsRepo for PgScheduleRepo {
    async fn list_shows(&self, user_id: UserId) -> Result<Vec<Show>, ScheduleError> {
        Ok(ScheduleRepo::list_shows(&self.pool, user_id, None, None).await?)
    }
}

#[async_trait]
impl SuggestShowsRepo for PgScheduleRepo {
    async fn suggested_shows(&self, user_id: UserId) -> Result<Vec<Show>, ScheduleError> {
        Ok(ScheduleRepo::suggested_shows(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl MarkEpisodeWatchedRepo for PgScheduleRepo {
    async fn mark_watched(&self, mark: &WatchedMark) -> Result<(), ScheduleError> {
        let WatchedMark { user_id, episode_id } = *mark;
        match ScheduleRepo::mark_watched(&self.pool, mark).await {
            Ok(()) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(ScheduleError::AlreadyWatched { user_id, episode_id })
            }
            Err(err) if is_foreign_key_violation(&err) => {
                Err(ScheduleError::EpisodeOrScheduleMissing { user_id, episode_id })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl MarkEpisodeUnwatchedRepo for PgScheduleRepo {
    async fn mark_unwatched(&self, mark: &WatchedMark) -> Result<(), ScheduleError> {
        ScheduleRepo::mark_unwatched(&self.pool, mark).await?;
        Ok(())
    }
}

#[async_trait]
impl ListFirstUnwatchedRepo for PgScheduleRepo {
    async fn first_unwatched(&self, user_id: UserId) -> Result<Vec<Episode>, ScheduleError> {
        Ok(ScheduleRepo::first_unwatched(&self.pool, user_id).await?)
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// User storage backed by Postgres.
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddUserRepo for PgUserRepo {
    async fn add_user(&self, user: &CreateUser) -> Result<User, AuthError> {
        match UserRepo::create(&self.pool, user).await {
            Ok(created) => Ok(created),
            Err(err) if is_unique_violation(&err) => Err(AuthError::UserAlreadyExists {
                username: user.username.clone(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl GetUserByUsernameRepo for PgUserRepo {
    async fn find_by_username(&self, username: &str) -> Result<User, AuthError> {
        UserRepo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AuthError::UserNotFound {
                username: username.to_string(),
            })
    }
}
