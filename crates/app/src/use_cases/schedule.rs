//! Use cases for per-user schedules, watch state and suggestions.

use async_trait::async_trait;
use showtrack_core::types::UserId;
use showtrack_db::models::episode::Episode;
use showtrack_db::models::schedule::{ScheduleEntry, WatchedMark};
use showtrack_db::models::show::Show;
use tracing::{info, warn};

use crate::error::ScheduleError;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Storage capability for adding a show to a user's schedule.
#[async_trait]
pub trait AddShowToScheduleRepo: Send + Sync {
    /// # Errors
    ///
    /// - [`ScheduleError::AlreadyScheduled`] if the entry already exists.
    /// - [`ScheduleError::ShowOrScheduleMissing`] if the show or the user
    ///   does not exist.
    async fn add_show(&self, entry: &ScheduleEntry) -> Result<(), ScheduleError>;
}

/// Storage capability for removing a show from a user's schedule.
/// Removing an absent entry is a no-op.
#[async_trait]
pub trait RemoveShowFromScheduleRepo: Send + Sync {
    async fn remove_show(&self, entry: &ScheduleEntry) -> Result<(), ScheduleError>;
}

/// Storage capability for listing the shows in a user's schedule.
#[async_trait]
pub trait ListScheduledShowsRepo: Send + Sync {
    async fn list_shows(&self, user_id: UserId) -> Result<Vec<Show>, ScheduleError>;
}

/// Storage capability for suggesting shows that share cast with the
/// user's schedule.
#[async_trait]
pub trait SuggestShowsRepo: Send + Sync {
    async fn suggested_shows(&self, user_id: UserId) -> Result<Vec<Show>, ScheduleError>;
}

/// Storage capability for marking an episode as watched.
#[async_trait]
pub trait MarkEpisodeWatchedRepo: Send + Sync {
    /// # Errors
    ///
    /// - [`ScheduleError::AlreadyWatched`] if the mark already exists.
    /// - [`ScheduleError::EpisodeOrScheduleMissing`] if the episode or the
    ///   user does not exist.
    async fn mark_watched(&self, mark: &WatchedMark) -> Result<(), ScheduleError>;
}

/// Storage capability for clearing a watched mark. Clearing an absent
/// mark is a no-op.
#[async_trait]
pub trait MarkEpisodeUnwatchedRepo: Send + Sync {
    async fn mark_unwatched(&self, mark: &WatchedMark) -> Result<(), ScheduleError>;
}

/// Storage capability for finding each scheduled show's first unwatched
/// episode.
#[async_trait]
pub trait ListFirstUnwatchedRepo: Send + Sync {
    async fn first_unwatched(&self, user_id: UserId) -> Result<Vec<Episode>, ScheduleError>;
}

// ---------------------------------------------------------------------------
// AddShowToSchedule
// ---------------------------------------------------------------------------

/// Add a show to a user's schedule.
pub struct AddShowToSchedule<R> {
    repo: R,
}

impl<R: AddShowToScheduleRepo> AddShowToSchedule<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - [`ScheduleError::AlreadyScheduled`] if the entry already exists.
    /// - [`ScheduleError::ShowOrScheduleMissing`] if the show or the user
    ///   does not exist.
    pub async fn execute(&self, entry: &ScheduleEntry) -> Result<(), ScheduleError> {
        let ScheduleEntry { user_id, show_id } = *entry;
        info!(%user_id, show_id, "Adding show to schedule");
        match self.repo.add_show(entry).await {
            Ok(()) => {
                info!(%user_id, show_id, "Added show to schedule");
                Ok(())
            }
            Err(err @ ScheduleError::AlreadyScheduled { .. }) => {
                warn!(%user_id, show_id, error = %err, "Show already in schedule");
                Err(err)
            }
            Err(err @ ScheduleError::ShowOrScheduleMissing { .. }) => {
                warn!(%user_id, show_id, error = %err, "Show or schedule not found");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// RemoveShowFromSchedule
// ---------------------------------------------------------------------------

/// Remove a show from a user's schedule.
pub struct RemoveShowFromSchedule<R> {
    repo: R,
}

impl<R: RemoveShowFromScheduleRepo> RemoveShowFromSchedule<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, entry: &ScheduleEntry) -> Result<(), ScheduleError> {
        let ScheduleEntry { user_id, show_id } = *entry;
        info!(%user_id, show_id, "Removing show from schedule");
        self.repo.remove_show(entry).await?;
        info!(%user_id, show_id, "Removed show from schedule");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ListScheduledShows
// ---------------------------------------------------------------------------

/// List the shows in a user's schedule, with casts.
pub struct ListScheduledShows<R> {
    repo: R,
}

impl<R: ListScheduledShowsRepo> ListScheduledShows<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Show>, ScheduleError> {
        info!(%user_id, "Listing scheduled shows");
        let shows = self.repo.list_shows(user_id).await?;
        info!(%user_id, count = shows.len(), "Listed scheduled shows");
        Ok(shows)
    }
}

// ---------------------------------------------------------------------------
// SuggestShows
// ---------------------------------------------------------------------------

/// Suggest shows sharing at least one cast member with the user's
/// schedule.
pub struct SuggestShows<R> {
    repo: R,
}

impl<R: SuggestShowsRepo> SuggestShows<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Show>, ScheduleError> {
        info!(%user_id, "Suggesting shows");
        let shows = self.repo.suggested_shows(user_id).await?;
        info!(%user_id, count = shows.len(), "Suggested shows");
        Ok(shows)
    }
}

// ---------------------------------------------------------------------------
// MarkEpisodeWatched
// ---------------------------------------------------------------------------

/// Mark an episode as watched for a user.
pub struct MarkEpisodeWatched<R> {
    repo: R,
}

impl<R: MarkEpisodeWatchedRepo> MarkEpisodeWatched<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - [`ScheduleError::AlreadyWatched`] if the mark already exists.
    /// - [`ScheduleError::EpisodeOrScheduleMissing`] if the episode or the
    ///   user does not exist.
    pub async fn execute(&self, mark: &WatchedMark) -> Result<(), ScheduleError> {
        let WatchedMark { user_id, episode_id } = *mark;
        info!(%user_id, episode_id, "Marking episode as watched");
        match self.repo.mark_watched(mark).await {
            Ok(()) => {
                info!(%user_id, episode_id, "Marked episode as watched");
                Ok(())
            }
            Err(err @ ScheduleError::EpisodeOrScheduleMissing { .. }) => {
                warn!(%user_id, episode_id, error = %err, "Episode or schedule not found");
                Err(err)
            }
            Err(err @ ScheduleError::AlreadyWatched { .. }) => {
                warn!(%user_id, episode_id, error = %err, "Episode already marked as watched");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// MarkEpisodeUnwatched
// ---------------------------------------------------------------------------

/// Clear an episode's watched mark for a user.
pub struct MarkEpisodeUnwatched<R> {
    repo: R,
}

impl<R: MarkEpisodeUnwatchedRepo> MarkEpisodeUnwatched<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, mark: &WatchedMark) -> Result<(), ScheduleError> {
        let WatchedMark { user_id, episode_id } = *mark;
        info!(%user_id, episode_id, "Marking episode as unwatched");
        self.repo.mark_unwatched(mark).await?;
        info!(%user_id, episode_id, "Marked episode as unwatched");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ListFirstUnwatched
// ---------------------------------------------------------------------------

/// For each scheduled show, the lowest (season, number) episode the user
/// has not watched.
pub struct ListFirstUnwatched<R> {
    repo: R,
}

impl<R: ListFirstUnwatchedRepo> ListFirstUnwatched<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Episode>, ScheduleError> {
        info!(%user_id, "Listing first unwatched episodes");
        let episodes = self.repo.first_unwatched(user_id).await?;
        info!(%user_id, count = episodes.len(), "Listed first unwatched episodes");
        Ok(episodes)
    }
}
