/// Listing primary keys are UUIDs assigned by the managed backend.
pub type ListingId = uuid::Uuid;

/// Auth user ids are UUIDs assigned by the managed backend.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
