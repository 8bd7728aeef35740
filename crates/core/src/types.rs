/// Primary key of the `movies` table (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Store-assigned timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
