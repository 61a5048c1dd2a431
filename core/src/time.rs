//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Build a datetime from whole seconds since the Unix epoch.
///
/// Returns `None` if the timestamp is out of range.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime> {
    DateTime::from_timestamp(secs, 0)
}
