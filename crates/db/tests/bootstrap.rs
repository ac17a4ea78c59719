use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    showtrack_db::health_check(&pool).await.unwrap();

    // Verify all tables exist and start empty
    let tables = [
        "actors",
        "shows",
        "episodes",
        "cast_members",
        "users",
        "schedule_entries",
        "watched_episodes",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty, got {} rows", count.0);
    }
}

/// UUID generation must be available for the users table default.
#[sqlx::test(migrations = "./migrations")]
async fn test_uuid_generation_available(pool: PgPool) {
    let result: (uuid::Uuid,) = sqlx::query_as("SELECT gen_random_uuid()")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!result.0.is_nil());
}
