//! Stay-interval date arithmetic shared by the pricing and availability engines.
//!
//! All comparisons are done on `NaiveDate` (calendar days, no time of day).

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Errors raised when building a stay at the request boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StayError {
    #[error("check-out {check_out} must be after check-in {check_in}")]
    EmptyStay {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    #[error("stay of {nights} nights exceeds the {max} night limit")]
    TooLong { nights: i64, max: i64 },
}

/// Longest stay a single request may price.
pub const MAX_STAY_NIGHTS: i64 = 365;

/// Reject stays longer than [`MAX_STAY_NIGHTS`]. Empty and reversed stays pass.
pub fn check_stay_length(check_in: NaiveDate, check_out: NaiveDate) -> Result<(), StayError> {
    let nights = (check_out - check_in).num_days();
    if nights > MAX_STAY_NIGHTS {
        return Err(StayError::TooLong {
            nights,
            max: MAX_STAY_NIGHTS,
        });
    }
    Ok(())
}

/// Every calendar date from `start` to `end`, both inclusive.
///
/// Returns an empty list when `end < start`.
pub fn each_day_of_interval(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// The priced nights of a stay: `check_in` inclusive to `check_out` exclusive.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    if check_out <= check_in {
        return Vec::new();
    }
    check_in.iter_days().take_while(|d| *d < check_out).collect()
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Inclusive containment test of `point` in `[start, end]`.
pub fn ranges_overlap_or_contain(point: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= point && point <= end
}

/// Inclusive calendar-date window, e.g. a holiday or high-season period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        ranges_overlap_or_contain(date, self.start, self.end)
    }
}

/// A validated stay with at least one night and at most [`MAX_STAY_NIGHTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StayInterval {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayInterval {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, StayError> {
        if check_out <= check_in {
            return Err(StayError::EmptyStay {
                check_in,
                check_out,
            });
        }
        check_stay_length(check_in, check_out)?;
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> Vec<NaiveDate> {
        nights(self.check_in, self.check_out)
    }
}
