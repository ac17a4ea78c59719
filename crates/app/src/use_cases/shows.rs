//! Use cases for show management.
//!
//! Reads return [`Show`] aggregates with the cast attached; a show that
//! has no cast is invisible to them.

use async_trait::async_trait;
use showtrack_core::types::DbId;
use showtrack_db::models::show::{CreateShow, Show, UpdateShow as UpdateShowInput};
use tracing::{info, warn};

use crate::error::ShowError;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Storage capability for creating shows.
#[async_trait]
pub trait AddShowRepo: Send + Sync {
    async fn create(&self, input: &CreateShow) -> Result<Show, ShowError>;
}

/// Storage capability for fetching a single show with its cast.
#[async_trait]
pub trait GetShowRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ShowError::NotFound`] if the joined read produced no rows
    /// for `show_id`.
    async fn find_by_id(&self, show_id: DbId) -> Result<Show, ShowError>;
}

/// Storage capability for listing shows with their casts.
#[async_trait]
pub trait ListShowsRepo: Send + Sync {
    /// `limit` and `offset` page over the underlying join rows; `None`
    /// means unbounded.
    async fn list(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<Show>, ShowError>;
}

/// Storage capability for partially updating a show.
#[async_trait]
pub trait UpdateShowRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ShowError::NotFound`] if no show with `show_id` exists.
    async fn update(&self, show_id: DbId, input: &UpdateShowInput) -> Result<Show, ShowError>;
}

/// Storage capability for deleting a show. Episodes, cast links and
/// schedule entries go with it; deleting an absent show is a no-op.
#[async_trait]
pub trait DeleteShowRepo: Send + Sync {
    async fn delete(&self, show_id: DbId) -> Result<(), ShowError>;
}

// ---------------------------------------------------------------------------
// AddShow
// ---------------------------------------------------------------------------

/// Create a new show. It starts with an empty cast.
pub struct AddShow<R> {
    repo: R,
}

impl<R: AddShowRepo> AddShow<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: &CreateShow) -> Result<Show, ShowError> {
        info!(name = %input.name, "Adding show");
        let show = self.repo.create(input).await?;
        info!(show_id = show.id, "Added show");
        Ok(show)
    }
}

// ---------------------------------------------------------------------------
// GetShow
// ---------------------------------------------------------------------------

/// Fetch a single show with its cast.
pub struct GetShow<R> {
    repo: R,
}

impl<R: GetShowRepo> GetShow<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`ShowError::NotFound`] if no show with `show_id` exists.
    pub async fn execute(&self, show_id: DbId) -> Result<Show, ShowError> {
        info!(show_id, "Fetching show");
        match self.repo.find_by_id(show_id).await {
            Ok(show) => {
                info!(show_id, "Fetched show");
                Ok(show)
            }
            Err(err @ ShowError::NotFound { .. }) => {
                warn!(show_id, error = %err, "Show not found");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// ListShows
// ---------------------------------------------------------------------------

/// List shows with their casts, paged over join rows.
pub struct ListShows<R> {
    repo: R,
}

impl<R: ListShowsRepo> ListShows<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Show>, ShowError> {
        info!(limit, offset, "Listing shows");
        let shows = self.repo.list(limit, offset).await?;
        info!(count = shows.len(), "Listed shows");
        Ok(shows)
    }
}

// ---------------------------------------------------------------------------
// UpdateShow
// ---------------------------------------------------------------------------

/// Partially update a show.
pub struct UpdateShow<R> {
    repo: R,
}

impl<R: UpdateShowRepo> UpdateShow<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`ShowError::NotFound`] if no show with `show_id` exists.
    pub async fn execute(
        &self,
        show_id: DbId,
        input: &UpdateShowInput,
    ) -> Result<Show, ShowError> {
        info!(show_id, "Updating show");
        let show = self.repo.update(show_id, input).await?;
        info!(show_id, "Updated show");
        Ok(show)
    }
}

// ---------------------------------------------------------------------------
// DeleteShow
// ---------------------------------------------------------------------------

/// Delete a show and everything hanging off it.
pub struct DeleteShow<R> {
    repo: R,
}

impl<R: DeleteShowRepo> DeleteShow<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, show_id: DbId) -> Result<(), ShowError> {
        info!(show_id, "Deleting show");
        self.repo.delete(show_id).await?;
        info!(show_id, "Deleted show");
        Ok(())
    }
}
