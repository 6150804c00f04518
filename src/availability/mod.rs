//! Availability engine module.
//!
//! Decides which calendar dates can be booked, given blocked date ranges and
//! the property's current day.

pub mod calendar;
pub mod models;
pub mod queries;
pub mod routes;
pub mod services;

pub use calendar::{
    compute_disabled_predicate, enumerate_blocked_dates, local_today, stay_conflicts,
    DisabledDates, DisabledReason,
};
pub use models::BlockedDateRange;
pub use routes::router;
