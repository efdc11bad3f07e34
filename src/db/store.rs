//! Persistence interfaces
//!
//! The diary service only talks to these traits; [`Database`](super::Database)
//! is the SQLite implementation.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

use super::DbResult;
use crate::models::{EntryId, FoodEntry, User};
use crate::reports::{DailyTotals, TimeRange};

/// User records keyed by numeric user id
pub trait UserStore {
    fn create_user(&self, user: &User) -> DbResult<User>;
    fn get_user(&self, user_id: i64) -> DbResult<Option<User>>;
    /// Returns `false` when no such user exists
    fn update_user(&self, user: &User) -> DbResult<bool>;
    fn delete_user(&self, user_id: i64) -> DbResult<bool>;
}

/// Food entry records keyed by entry id and owning user
pub trait FoodEntryStore {
    /// Persist a new entry and return it with its assigned id
    fn create_entry(&self, entry: &FoodEntry) -> DbResult<FoodEntry>;
    fn get_entry(&self, user_id: i64, id: EntryId) -> DbResult<Option<FoodEntry>>;
    /// Entries of a user, newest first, optionally limited to a time range
    fn list_entries(&self, user_id: i64, range: Option<TimeRange>) -> DbResult<Vec<FoodEntry>>;
    /// Overwrite the mutable fields of a stored entry; `created_at` is kept
    fn update_entry(&self, entry: &FoodEntry) -> DbResult<bool>;
    fn delete_entry(&self, user_id: i64, id: EntryId) -> DbResult<bool>;
    /// Grouped sum equivalent to [`crate::reports::daily_totals`]
    fn sum_entries(&self, user_id: i64, range: TimeRange) -> DbResult<DailyTotals>;
}

/// Timestamps are stored as fixed-width RFC 3339 UTC text so that string
/// comparison orders them chronologically
pub(crate) fn timestamp_to_db(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn timestamp_from_row(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            let idx = row.as_ref().column_index(column).unwrap_or_default();
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
        })
}
