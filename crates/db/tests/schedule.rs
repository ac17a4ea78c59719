//! Integration tests for schedules, watch state and suggestions.

use chrono::{TimeZone, Utc};
use showtrack_db::models::actor::CreateActor;
use showtrack_db::models::episode::CreateEpisode;
use showtrack_db::models::schedule::{CastMembership, ScheduleEntry, WatchedMark};
use showtrack_db::models::show::CreateShow;
use showtrack_db::models::user::CreateUser;
use showtrack_db::repositories::{ActorRepo, EpisodeRepo, ScheduleRepo, ShowRepo, UserRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> Uuid {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            role: "USER".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

/// Create a show with the given cast, returning its id.
async fn seed_show(pool: &PgPool, name: &str, cast: &[i64]) -> i64 {
    let show = ShowRepo::create(
        pool,
        &CreateShow {
            name: name.to_string(),
            seasons_count: 1,
            image_url: format!("https://img.example/{name}.png"),
        },
    )
    .await
    .unwrap();
    for &actor_id in cast {
        ActorRepo::add_cast_member(
            pool,
            &CastMembership {
                show_id: show.id,
                actor_id,
            },
        )
        .await
        .unwrap();
    }
    show.id
}

async fn seed_actor(pool: &PgPool, name: &str) -> i64 {
    ActorRepo::create(
        pool,
        &CreateActor {
            name: name.to_string(),
            image_url: format!("https://img.example/{name}.png"),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_episode(pool: &PgPool, show_id: i64, season: i32, number: i32) -> i64 {
    EpisodeRepo::create(
        pool,
        &CreateEpisode {
            name: format!("S{season:02}E{number:02}"),
            season,
            number,
            air_date: Utc.with_ymd_and_hms(2026, 3, 10, 20, 0, 0).unwrap(),
            show_id,
        },
    )
    .await
    .unwrap()
    .id
}

fn entry(user_id: Uuid, show_id: i64) -> ScheduleEntry {
    ScheduleEntry { user_id, show_id }
}

fn mark(user_id: Uuid, episode_id: i64) -> WatchedMark {
    WatchedMark { user_id, episode_id }
}

// ---------------------------------------------------------------------------
// Test: Scheduling and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_add_and_list_scheduled_shows(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;
    let scheduled = seed_show(&pool, "Watched", &[actor_id]).await;
    let _other = seed_show(&pool, "Ignored", &[actor_id]).await;

    ScheduleRepo::add_show(&pool, &entry(user_id, scheduled))
        .await
        .unwrap();

    let shows = ScheduleRepo::list_shows(&pool, user_id, None, None)
        .await
        .unwrap();
    assert_eq!(shows.len(), 1);
    assert_eq!(shows[0].id, scheduled);
    assert_eq!(shows[0].cast.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_schedule_same_show_twice_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;
    let show_id = seed_show(&pool, "Once", &[actor_id]).await;

    ScheduleRepo::add_show(&pool, &entry(user_id, show_id))
        .await
        .unwrap();

    let err = ScheduleRepo::add_show(&pool, &entry(user_id, show_id))
        .await
        .expect_err("scheduling the same show twice should fail");
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_schedule_nonexistent_show_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;

    let err = ScheduleRepo::add_show(&pool, &entry(user_id, 999_999))
        .await
        .expect_err("scheduling a non-existent show should fail");
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_remove_show_reports_presence(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;
    let show_id = seed_show(&pool, "Gone", &[actor_id]).await;
    ScheduleRepo::add_show(&pool, &entry(user_id, show_id))
        .await
        .unwrap();

    assert!(ScheduleRepo::remove_show(&pool, &entry(user_id, show_id))
        .await
        .unwrap());
    assert!(!ScheduleRepo::remove_show(&pool, &entry(user_id, show_id))
        .await
        .unwrap());
}

// ---------------------------------------------------------------------------
// Test: Suggestions share at least one cast member with the schedule
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_suggested_shows_share_cast(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let shared = seed_actor(&pool, "Shared").await;
    let unrelated = seed_actor(&pool, "Unrelated").await;

    let scheduled = seed_show(&pool, "Scheduled", &[shared]).await;
    let overlapping = seed_show(&pool, "Overlapping", &[shared, unrelated]).await;
    let _disjoint = seed_show(&pool, "Disjoint", &[unrelated]).await;

    ScheduleRepo::add_show(&pool, &entry(user_id, scheduled))
        .await
        .unwrap();

    let suggestions = ScheduleRepo::suggested_shows(&pool, user_id).await.unwrap();
    let ids: Vec<i64> = suggestions.iter().map(|s| s.id).collect();

    // The scheduled show shares its own cast, so it shows up too.
    assert_eq!(ids, vec![scheduled, overlapping]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_suggestions_empty_without_schedule(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;
    seed_show(&pool, "Unscheduled", &[actor_id]).await;

    let suggestions = ScheduleRepo::suggested_shows(&pool, user_id).await.unwrap();
    assert!(suggestions.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Watch state
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_watched_and_unwatched(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;
    let show_id = seed_show(&pool, "Progress", &[actor_id]).await;
    let episode_id = seed_episode(&pool, show_id, 1, 1).await;

    ScheduleRepo::mark_watched(&pool, &mark(user_id, episode_id))
        .await
        .unwrap();

    assert!(ScheduleRepo::mark_unwatched(&pool, &mark(user_id, episode_id))
        .await
        .unwrap());
    assert!(!ScheduleRepo::mark_unwatched(&pool, &mark(user_id, episode_id))
        .await
        .unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_watched_twice_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;
    let show_id = seed_show(&pool, "Twice", &[actor_id]).await;
    let episode_id = seed_episode(&pool, show_id, 1, 1).await;

    ScheduleRepo::mark_watched(&pool, &mark(user_id, episode_id))
        .await
        .unwrap();

    let err = ScheduleRepo::mark_watched(&pool, &mark(user_id, episode_id))
        .await
        .expect_err("marking the same episode twice should fail");
    let db_err = err.as_database_error().expect("expected a database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
}

// ---------------------------------------------------------------------------
// Test: First unwatched episode per scheduled show
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_first_unwatched_per_scheduled_show(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;

    let first = seed_show(&pool, "First", &[actor_id]).await;
    let e11 = seed_episode(&pool, first, 1, 1).await;
    let e12 = seed_episode(&pool, first, 1, 2).await;
    let second = seed_show(&pool, "Second", &[actor_id]).await;
    let e21 = seed_episode(&pool, second, 1, 1).await;

    for show_id in [first, second] {
        ScheduleRepo::add_show(&pool, &entry(user_id, show_id))
            .await
            .unwrap();
    }
    ScheduleRepo::mark_watched(&pool, &mark(user_id, e11))
        .await
        .unwrap();

    let next = ScheduleRepo::first_unwatched(&pool, user_id).await.unwrap();
    let ids: Vec<i64> = next.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![e12, e21]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_first_unwatched_skips_fully_watched_show(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;

    let done = seed_show(&pool, "Done", &[actor_id]).await;
    let e1 = seed_episode(&pool, done, 1, 1).await;
    let pending = seed_show(&pool, "Pending", &[actor_id]).await;
    let e2 = seed_episode(&pool, pending, 1, 1).await;

    for show_id in [done, pending] {
        ScheduleRepo::add_show(&pool, &entry(user_id, show_id))
            .await
            .unwrap();
    }
    ScheduleRepo::mark_watched(&pool, &mark(user_id, e1))
        .await
        .unwrap();

    let next = ScheduleRepo::first_unwatched(&pool, user_id).await.unwrap();
    let ids: Vec<i64> = next.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![e2]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_first_unwatched_ignores_unscheduled_shows(pool: PgPool) {
    let user_id = seed_user(&pool, "viewer").await;
    let actor_id = seed_actor(&pool, "Ann").await;

    let unscheduled = seed_show(&pool, "Unscheduled", &[actor_id]).await;
    seed_episode(&pool, unscheduled, 1, 1).await;

    let next = ScheduleRepo::first_unwatched(&pool, user_id).await.unwrap();
    assert!(next.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Watch state is per-user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_watch_state_is_per_user(pool: PgPool) {
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let actor_id = seed_actor(&pool, "Ann").await;
    let show_id = seed_show(&pool, "Shared", &[actor_id]).await;
    let episode_id = seed_episode(&pool, show_id, 1, 1).await;

    for user_id in [alice, bob] {
        ScheduleRepo::add_show(&pool, &entry(user_id, show_id))
            .await
            .unwrap();
    }
    ScheduleRepo::mark_watched(&pool, &mark(alice, episode_id))
        .await
        .unwrap();

    assert!(ScheduleRepo::first_unwatched(&pool, alice)
        .await
        .unwrap()
        .is_empty());
    let bobs: Vec<i64> = ScheduleRepo::first_unwatched(&pool, bob)
        .await
        .unwrap()
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(bobs, vec![episode_id]);
}
