//! Pricing route handlers

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;

use crate::availability::{self, local_today, stay_conflicts};
use crate::error::{AppError, Result};
use crate::stay::{check_stay_length, StayInterval};
use crate::AppState;

use super::calculators::quote_stay;
use super::models::PricingRule;
use super::requests::{CalculatePriceRequest, QuoteRequest};
use super::responses::QuoteResponse;
use super::services;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/quote", post(quote))
}

/// Price a stay against the rules sent in the body.
///
/// An empty or reversed stay prices to zero rather than failing. Stays longer
/// than `MAX_STAY_NIGHTS` are rejected.
async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<CalculatePriceRequest>,
) -> Result<Json<QuoteResponse>> {
    check_stay_length(req.check_in, req.check_out)?;

    let rules = req
        .rules
        .into_iter()
        .map(PricingRule::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let quote = quote_stay(req.check_in, req.check_out, &rules);
    Ok(Json(QuoteResponse::from_quote(&quote, &state.config.currency)))
}

/// Quote a stay against the stored rules and flag unavailable nights
async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let stay = StayInterval::new(req.check_in, req.check_out)?;

    let quote = services::quote_stored_stay(&state.db, &state.cache, &stay).await?;
    let blocked = availability::services::load_blocked_ranges(&state.db, &state.cache).await?;
    let today = local_today(Utc::now(), state.config.utc_offset);
    let conflicts = stay_conflicts(&stay, &blocked, today);

    if !conflicts.is_empty() {
        tracing::info!(
            "Quote for {}..{} hits {} unavailable nights",
            stay.check_in(),
            stay.check_out(),
            conflicts.len()
        );
    }

    Ok(Json(
        QuoteResponse::from_quote(&quote, &state.config.currency).with_conflicts(conflicts),
    ))
}
