/// Primary keys are opaque text identifiers (cuid / uuid strings).
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
