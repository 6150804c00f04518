//! Availability route handlers

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::stay::each_day_of_interval;
use crate::AppState;

use super::calendar::{enumerate_blocked_dates, local_today, DisabledDates, DisabledReason};
use super::services;

/// Longest window the calendar endpoint will expand
const MAX_CALENDAR_DAYS: u64 = 366;

/// Window used when `to` is omitted
const DEFAULT_CALENDAR_DAYS: u64 = 90;

/// Availability routes, mounted under `/api/availability`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blocked-dates", get(blocked_dates))
        .route("/calendar", get(calendar))
}

/// Query parameters for the calendar
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// One day of the booking calendar
#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DisabledReason>,
    /// Public holiday name, for highlighting only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub today: NaiveDate,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Serialize)]
pub struct BlockedDatesResponse {
    pub dates: Vec<NaiveDate>,
    pub count: usize,
}

/// Every individual blocked date, for reserved-date markers
async fn blocked_dates(State(state): State<AppState>) -> Result<Json<BlockedDatesResponse>> {
    let ranges = services::load_blocked_ranges(&state.db, &state.cache).await?;
    let dates = enumerate_blocked_dates(&ranges);
    Ok(Json(BlockedDatesResponse {
        count: dates.len(),
        dates,
    }))
}

/// Per-day selectable state over `[from, to]`
async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>> {
    let today = local_today(Utc::now(), state.config.utc_offset);
    let (from, to) = calendar_window(today, query.from, query.to)?;

    let ranges = services::blocked_ranges_between(&state.db, from, to).await?;
    let disabled = DisabledDates::new(today, ranges);

    let mut holiday_names: HashMap<NaiveDate, &'static str> = HashMap::new();
    for year in from.year()..=to.year() {
        for h in state.cache.holidays_for(year).await.iter() {
            holiday_names.insert(h.date, h.name);
        }
    }

    let days = each_day_of_interval(from, to)
        .into_iter()
        .map(|date| {
            let reason = disabled.reason(date);
            CalendarDay {
                date,
                disabled: reason.is_some(),
                reason,
                holiday: holiday_names.get(&date).copied(),
            }
        })
        .collect();

    Ok(Json(CalendarResponse { today, days }))
}

/// Resolve and bound the requested window.
fn calendar_window(
    today: NaiveDate,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate)> {
    let from = from.unwrap_or(today);
    let to = match to {
        Some(to) => to,
        None => from
            .checked_add_days(Days::new(DEFAULT_CALENDAR_DAYS - 1))
            .ok_or_else(|| AppError::BadRequest("calendar window out of range".to_string()))?,
    };

    if to < from {
        return Err(AppError::BadRequest(format!(
            "'to' ({}) is before 'from' ({})",
            to, from
        )));
    }
    let span = (to - from).num_days() as u64 + 1;
    if span > MAX_CALENDAR_DAYS {
        return Err(AppError::BadRequest(format!(
            "calendar window of {} days exceeds {}",
            span, MAX_CALENDAR_DAYS
        )));
    }
    Ok((from, to))
}
