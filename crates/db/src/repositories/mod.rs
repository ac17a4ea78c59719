//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Absent rows come back as
//! `Option` / `false`; constraint violations surface as
//! `sqlx::Error::Database` for the caller to classify.

pub mod actor_repo;
pub mod episode_repo;
pub mod schedule_repo;
pub mod show_repo;
pub mod user_repo;

pub use actor_repo::ActorRepo;
pub use episode_repo::EpisodeRepo;
pub use schedule_repo::ScheduleRepo;
pub use show_repo::ShowRepo;
pub use user_repo::UserRepo;
