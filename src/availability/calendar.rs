//! Date availability for the booking calendar.
//!
//! Pure functions; callers fetch the blocked ranges and pass in "today".

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;

use super::models::BlockedDateRange;
use crate::stay::{each_day_of_interval, StayInterval};

/// Calendar day at `offset` for the instant `now`.
pub fn local_today(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// Why a date cannot be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    Past,
    Blocked,
}

/// Predicate over calendar dates: past days and blocked days are disabled.
pub fn compute_disabled_predicate(
    today: NaiveDate,
    blocked: &[BlockedDateRange],
) -> impl Fn(NaiveDate) -> bool + '_ {
    move |date| date < today || blocked.iter().any(|r| r.contains(date))
}

/// Owned form of [`compute_disabled_predicate`] that also says why a date is disabled.
#[derive(Debug, Clone)]
pub struct DisabledDates {
    today: NaiveDate,
    blocked: Vec<BlockedDateRange>,
}

impl DisabledDates {
    pub fn new(today: NaiveDate, blocked: Vec<BlockedDateRange>) -> Self {
        Self { today, blocked }
    }

    /// `Past` is reported for past days even when they are also blocked.
    pub fn reason(&self, date: NaiveDate) -> Option<DisabledReason> {
        if date < self.today {
            Some(DisabledReason::Past)
        } else if self.blocked.iter().any(|r| r.contains(date)) {
            Some(DisabledReason::Blocked)
        } else {
            None
        }
    }
}

/// Every date covered by at least one range, ascending and without duplicates.
pub fn enumerate_blocked_dates(blocked: &[BlockedDateRange]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = blocked
        .iter()
        .flat_map(|r| each_day_of_interval(r.start_date, r.end_date))
        .collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Nights of `stay` that are in the past or blocked.
///
/// The check-out day is not a night, so a stay may end on a blocked day.
pub fn stay_conflicts(
    stay: &StayInterval,
    blocked: &[BlockedDateRange],
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let disabled = compute_disabled_predicate(today, blocked);
    stay.nights().into_iter().filter(|d| disabled(*d)).collect()
}
