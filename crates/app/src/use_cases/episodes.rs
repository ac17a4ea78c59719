//! Use cases for episode management.

use async_trait::async_trait;
use showtrack_core::types::DbId;
use showtrack_db::models::episode::{CreateEpisode, Episode, UpdateEpisode as UpdateEpisodeInput};
use tracing::{info, warn};

use crate::error::EpisodeError;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Storage capability for creating episodes.
#[async_trait]
pub trait AddEpisodeRepo: Send + Sync {
    async fn create(&self, input: &CreateEpisode) -> Result<Episode, EpisodeError>;
}

/// Storage capability for fetching a single episode.
#[async_trait]
pub trait GetEpisodeRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`EpisodeError::NotFound`] if no episode with `episode_id`
    /// exists.
    async fn find_by_id(&self, episode_id: DbId) -> Result<Episode, EpisodeError>;
}

/// Storage capability for listing a show's episodes in (season, number)
/// order.
#[async_trait]
pub trait ListEpisodesRepo: Send + Sync {
    async fn list_by_show(&self, show_id: DbId) -> Result<Vec<Episode>, EpisodeError>;
}

/// Storage capability for partially updating an episode.
#[async_trait]
pub trait UpdateEpisodeRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`EpisodeError::NotFound`] if no episode with `episode_id`
    /// exists.
    async fn update(
        &self,
        episode_id: DbId,
        input: &UpdateEpisodeInput,
    ) -> Result<Episode, EpisodeError>;
}

/// Storage capability for deleting an episode. Deleting an absent episode
/// is a no-op.
#[async_trait]
pub trait DeleteEpisodeRepo: Send + Sync {
    async fn delete(&self, episode_id: DbId) -> Result<(), EpisodeError>;
}

// ---------------------------------------------------------------------------
// AddEpisode
// ---------------------------------------------------------------------------

/// Create a new episode of a show.
pub struct AddEpisode<R> {
    repo: R,
}

impl<R: AddEpisodeRepo> AddEpisode<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: &CreateEpisode) -> Result<Episode, EpisodeError> {
        info!(show_id = input.show_id, name = %input.name, "Adding episode");
        let episode = self.repo.create(input).await?;
        info!(episode_id = episode.id, "Added episode");
        Ok(episode)
    }
}

// ---------------------------------------------------------------------------
// GetEpisode
// ---------------------------------------------------------------------------

/// Fetch a single episode by id.
pub struct GetEpisode<R> {
    repo: R,
}

impl<R: GetEpisodeRepo> GetEpisode<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`EpisodeError::NotFound`] if no episode with `episode_id`
    /// exists.
    pub async fn execute(&self, episode_id: DbId) -> Result<Episode, EpisodeError> {
        info!(episode_id, "Fetching episode");
        match self.repo.find_by_id(episode_id).await {
            Ok(episode) => {
                info!(episode_id, "Fetched episode");
                Ok(episode)
            }
            Err(err @ EpisodeError::NotFound { .. }) => {
                warn!(episode_id, error = %err, "Episode not found");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// ListEpisodes
// ---------------------------------------------------------------------------

/// List all episodes of a show in (season, number) order.
pub struct ListEpisodes<R> {
    repo: R,
}

impl<R: ListEpisodesRepo> ListEpisodes<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, show_id: DbId) -> Result<Vec<Episode>, EpisodeError> {
        info!(show_id, "Listing episodes of show");
        let episodes = self.repo.list_by_show(show_id).await?;
        info!(show_id, count = episodes.len(), "Listed episodes of show");
        Ok(episodes)
    }
}

// ---------------------------------------------------------------------------
// UpdateEpisode
// ---------------------------------------------------------------------------

/// Partially update an episode.
pub struct UpdateEpisode<R> {
    repo: R,
}

impl<R: UpdateEpisodeRepo> UpdateEpisode<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`EpisodeError::NotFound`] if no episode with `episode_id`
    /// exists.
    pub async fn execute(
        &self,
        episode_id: DbId,
        input: &UpdateEpisodeInput,
    ) -> Result<Episode, EpisodeError> {
        info!(episode_id, "Updating episode");
        let episode = self.repo.update(episode_id, input).await?;
        info!(episode_id, "Updated episode");
        Ok(episode)
    }
}

// ---------------------------------------------------------------------------
// DeleteEpisode
// ---------------------------------------------------------------------------

/// Delete an episode.
pub struct DeleteEpisode<R> {
    repo: R,
}

impl<R: DeleteEpisodeRepo> DeleteEpisode<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, episode_id: DbId) -> Result<(), EpisodeError> {
        info!(episode_id, "Deleting episode");
        self.repo.delete(episode_id).await?;
        info!(episode_id, "Deleted episode");
        Ok(())
    }
}
