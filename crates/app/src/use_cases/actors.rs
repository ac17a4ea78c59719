//! Use cases for actor management and show casts.

use async_trait::async_trait;
use showtrack_core::types::DbId;
use showtrack_db::models::actor::{Actor, CreateActor, UpdateActor as UpdateActorInput};
use showtrack_db::models::schedule::CastMembership;
use tracing::{info, warn};

use crate::error::ActorError;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Storage capability for creating actors.
#[async_trait]
pub trait AddActorRepo: Send + Sync {
    async fn create(&self, input: &CreateActor) -> Result<Actor, ActorError>;
}

/// Storage capability for fetching a single actor.
#[async_trait]
pub trait GetActorRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ActorError::NotFound`] if no actor with `actor_id` exists.
    async fn find_by_id(&self, actor_id: DbId) -> Result<Actor, ActorError>;
}

/// Storage capability for partially updating an actor.
#[async_trait]
pub trait UpdateActorRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ActorError::NotFound`] if no actor with `actor_id` exists.
    async fn update(&self, actor_id: DbId, input: &UpdateActorInput) -> Result<Actor, ActorError>;
}

/// Storage capability for deleting an actor. Deleting an absent actor is
/// a no-op.
#[async_trait]
pub trait DeleteActorRepo: Send + Sync {
    async fn delete(&self, actor_id: DbId) -> Result<(), ActorError>;
}

/// Storage capability for linking an actor into a show's cast.
#[async_trait]
pub trait AddCastMemberRepo: Send + Sync {
    /// # Errors
    ///
    /// - [`ActorError::ActorOrShowMissing`] if either end of the link does
    ///   not exist.
    /// - [`ActorError::AlreadyInCast`] if the link already exists.
    async fn add_cast_member(&self, link: &CastMembership) -> Result<(), ActorError>;
}

/// Storage capability for unlinking an actor from a show's cast. Removing
/// an absent link is a no-op.
#[async_trait]
pub trait RemoveCastMemberRepo: Send + Sync {
    async fn remove_cast_member(&self, link: &CastMembership) -> Result<(), ActorError>;
}

// ---------------------------------------------------------------------------
// AddActor
// ---------------------------------------------------------------------------

/// Create a new actor.
pub struct AddActor<R> {
    repo: R,
}

impl<R: AddActorRepo> AddActor<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: &CreateActor) -> Result<Actor, ActorError> {
        info!(name = %input.name, "Adding actor");
        let actor = self.repo.create(input).await?;
        info!(actor_id = actor.id, "Added actor");
        Ok(actor)
    }
}

// ---------------------------------------------------------------------------
// GetActor
// ---------------------------------------------------------------------------

/// Fetch a single actor by id.
pub struct GetActor<R> {
    repo: R,
}

impl<R: GetActorRepo> GetActor<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`ActorError::NotFound`] if no actor with `actor_id` exists.
    pub async fn execute(&self, actor_id: DbId) -> Result<Actor, ActorError> {
        info!(actor_id, "Fetching actor");
        match self.repo.find_by_id(actor_id).await {
            Ok(actor) => {
                info!(actor_id, "Fetched actor");
                Ok(actor)
            }
            Err(err @ ActorError::NotFound { .. }) => {
                warn!(actor_id, error = %err, "Actor not found");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// UpdateActor
// ---------------------------------------------------------------------------

/// Partially update an actor.
pub struct UpdateActor<R> {
    repo: R,
}

impl<R: UpdateActorRepo> UpdateActor<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`ActorError::NotFound`] if no actor with `actor_id` exists.
    pub async fn execute(
        &self,
        actor_id: DbId,
        input: &UpdateActorInput,
    ) -> Result<Actor, ActorError> {
        info!(actor_id, "Updating actor");
        let actor = self.repo.update(actor_id, input).await?;
        info!(actor_id, "Updated actor");
        Ok(actor)
    }
}

// ---------------------------------------------------------------------------
// DeleteActor
// ---------------------------------------------------------------------------

/// Delete an actor. Their cast links go with them.
pub struct DeleteActor<R> {
    repo: R,
}

impl<R: DeleteActorRepo> DeleteActor<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, actor_id: DbId) -> Result<(), ActorError> {
        info!(actor_id, "Deleting actor");
        self.repo.delete(actor_id).await?;
        info!(actor_id, "Deleted actor");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AddCastMember
// ---------------------------------------------------------------------------

/// Link an actor into a show's cast.
pub struct AddCastMember<R> {
    repo: R,
}

impl<R: AddCastMemberRepo> AddCastMember<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - [`ActorError::ActorOrShowMissing`] if either end of the link does
    ///   not exist.
    /// - [`ActorError::AlreadyInCast`] if the link already exists.
    pub async fn execute(&self, link: &CastMembership) -> Result<(), ActorError> {
        let CastMembership { show_id, actor_id } = *link;
        info!(show_id, actor_id, "Adding actor to show cast");
        match self.repo.add_cast_member(link).await {
            Ok(()) => {
                info!(show_id, actor_id, "Added actor to show cast");
                Ok(())
            }
            Err(err @ ActorError::ActorOrShowMissing { .. }) => {
                warn!(show_id, actor_id, error = %err, "Actor or show not found");
                Err(err)
            }
            Err(err @ ActorError::AlreadyInCast { .. }) => {
                warn!(show_id, actor_id, error = %err, "Actor already in show cast");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// RemoveCastMember
// ---------------------------------------------------------------------------

/// Unlink an actor from a show's cast.
pub struct RemoveCastMember<R> {
    repo: R,
}

impl<R: RemoveCastMemberRepo> RemoveCastMember<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, link: &CastMembership) -> Result<(), ActorError> {
        let CastMembership { show_id, actor_id } = *link;
        info!(show_id, actor_id, "Removing actor from show cast");
        self.repo.remove_cast_member(link).await?;
        info!(show_id, actor_id, "Removed actor from show cast");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::{Arc, Mutex};

    fn actor(id: DbId) -> Actor {
        Actor {
            id,
            name: format!("Actor {id}"),
            image_url: format!("https://img.example/{id}.png"),
        }
    }

    struct FakeActorStore {
        created: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl AddActorRepo for FakeActorStore {
        async fn create(&self, input: &CreateActor) -> Result<Actor, ActorError> {
            self.created.lock().unwrap().push(input.name.clone());
            Ok(actor(1))
        }
    }

    struct MissingActorStore;

    #[async_trait]
    impl GetActorRepo for MissingActorStore {
        async fn find_by_id(&self, actor_id: DbId) -> Result<Actor, ActorError> {
            Err(ActorError::NotFound { actor_id })
        }
    }

    struct BrokenActorStore;

    #[async_trait]
    impl GetActorRepo for BrokenActorStore {
        async fn find_by_id(&self, _actor_id: DbId) -> Result<Actor, ActorError> {
            Err(ActorError::Storage(sqlx::Error::PoolClosed))
        }
    }

    struct FullCastStore;

    #[async_trait]
    impl AddCastMemberRepo for FullCastStore {
        async fn add_cast_member(&self, link: &CastMembership) -> Result<(), ActorError> {
            Err(ActorError::AlreadyInCast {
                show_id: link.show_id,
                actor_id: link.actor_id,
            })
        }
    }

    #[tokio::test]
    async fn test_add_actor_calls_repo_once() {
        let created = Arc::new(Mutex::new(Vec::new()));
        let use_case = AddActor::new(FakeActorStore {
            created: created.clone(),
        });

        let input = CreateActor {
            name: "Ann".to_string(),
            image_url: "https://img.example/ann.png".to_string(),
        };
        let actor = use_case.execute(&input).await.unwrap();

        assert_eq!(actor.id, 1);
        assert_eq!(*created.lock().unwrap(), vec!["Ann".to_string()]);
    }

    #[tokio::test]
    async fn test_get_actor_reraises_not_found_unchanged() {
        let use_case = GetActor::new(MissingActorStore);

        let err = use_case.execute(7).await.unwrap_err();
        assert_matches!(err, ActorError::NotFound { actor_id: 7 });
    }

    #[tokio::test]
    async fn test_get_actor_propagates_storage_errors() {
        let use_case = GetActor::new(BrokenActorStore);

        let err = use_case.execute(7).await.unwrap_err();
        assert_matches!(err, ActorError::Storage(_));
    }

    #[tokio::test]
    async fn test_add_cast_member_reraises_conflict_unchanged() {
        let use_case = AddCastMember::new(FullCastStore);

        let link = CastMembership {
            show_id: 3,
            actor_id: 9,
        };
        let err = use_case.execute(&link).await.unwrap_err();
        assert_matches!(
            err,
            ActorError::AlreadyInCast {
                show_id: 3,
                actor_id: 9
            }
        );
    }
}
