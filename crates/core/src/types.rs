/// All database primary keys for users and sessions are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Comics are keyed by a generated UUID rather than a sequence.
pub type ComicId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
