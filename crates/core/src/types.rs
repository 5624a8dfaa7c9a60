/// All primary keys are UUID v4 values generated by the application.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date without a time component (e.g. a film's creation date).
pub type Date = chrono::NaiveDate;
