/// All catalogue primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User identifiers are UUIDs assigned by the database.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
