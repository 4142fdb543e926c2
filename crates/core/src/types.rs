/// Platform-owned primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// User ids come from the identity provider.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
