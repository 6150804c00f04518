//! HTTP router composition and small service endpoints

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::CacheStats;
use crate::error::{AppError, Result};
use crate::holidays::PublicHoliday;
use crate::{availability, pricing, AppState};

/// Years the holiday endpoint accepts
const HOLIDAY_YEARS: std::ops::RangeInclusive<i32> = 1900..=2200;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/holidays/:year", get(holidays))
        .route("/api/cache/invalidate", post(invalidate_cache))
        .nest("/api/pricing", pricing::router())
        .nest("/api/availability", availability::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: CacheStats,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}

#[derive(Debug, Serialize)]
pub struct HolidaysResponse {
    pub year: i32,
    pub holidays: Vec<PublicHoliday>,
}

/// Public holidays of a year, for calendar highlighting
async fn holidays(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<HolidaysResponse>> {
    if !HOLIDAY_YEARS.contains(&year) {
        return Err(AppError::NotFound(format!("no holiday calendar for {}", year)));
    }
    let holidays = state.cache.holidays_for(year).await;
    Ok(Json(HolidaysResponse {
        year,
        holidays: holidays.as_ref().clone(),
    }))
}

/// Drop cached rules and blocks after an admin edit
async fn invalidate_cache(State(state): State<AppState>) -> Json<CacheStats> {
    state.cache.invalidate_all();
    Json(state.cache.stats())
}
