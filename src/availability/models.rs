//! Blocked-date models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::stay::ranges_overlap_or_contain;

/// Inclusive span of calendar dates during which the property cannot be booked.
///
/// Ranges may overlap; nothing merges them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedDateRange {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

impl BlockedDateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            reason: None,
        }
    }

    /// Build a range from boundaries stored as instants.
    ///
    /// The store writes the admin's calendar day as UTC midnight. Reading that
    /// instant in a zone west of UTC lands on the previous day, so each
    /// boundary is taken as its UTC calendar date instead.
    pub fn from_stored_bounds(id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id,
            start_date: start.date_naive(),
            end_date: end.date_naive(),
            reason: None,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        ranges_overlap_or_contain(date, self.start_date, self.end_date)
    }
}

/// Row from `blocked_dates`.
///
/// Boundaries are `timestamptz` columns holding the admin's day at UTC midnight.
#[derive(Debug, Clone, FromRow)]
pub struct BlockedDateRow {
    pub id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<BlockedDateRow> for BlockedDateRange {
    fn from(row: BlockedDateRow) -> Self {
        Self {
            reason: row.reason,
            ..Self::from_stored_bounds(row.id, row.start_date, row.end_date)
        }
    }
}
