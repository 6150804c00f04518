//! Pricing service functions with database access.
//!
//! These functions read rules through the cache and hand them to the pure
//! calculators.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{debug, warn};

use crate::cache::AppCache;
use crate::error::AppError;
use crate::stay::StayInterval;

use super::calculators::{quote_stay, singleton_conflicts, PriceQuote};
use super::models::{PricingRule, PricingRuleRow};
use super::queries;

/// Convert stored rows, dropping rows the engine cannot use.
///
/// A holiday without dates or a package without `min_nights` never matches a
/// night, so skipping it leaves prices unchanged.
pub fn rules_from_rows(rows: Vec<PricingRuleRow>) -> Vec<PricingRule> {
    let rules: Vec<PricingRule> = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id;
            match PricingRule::try_from(row) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    warn!("Skipping pricing rule {}: {}", id, e);
                    None
                }
            }
        })
        .collect();

    for price_type in singleton_conflicts(&rules) {
        warn!(
            "More than one active {} rule; using the oldest one",
            price_type
        );
    }

    rules
}

/// Read active rules from the database, bypassing the cache
pub async fn fetch_pricing_rules(pool: &PgPool) -> Result<Vec<PricingRule>, AppError> {
    let rows = queries::list_active_pricing_rules(pool).await?;
    Ok(rules_from_rows(rows))
}

/// Active rules, from cache when present
pub async fn load_pricing_rules(
    pool: &PgPool,
    cache: &AppCache,
) -> Result<Arc<Vec<PricingRule>>, AppError> {
    if let Some(rules) = cache.get_pricing_rules().await {
        debug!("Cache HIT for pricing rules");
        return Ok(rules);
    }

    debug!("Cache MISS for pricing rules");
    let rules = Arc::new(fetch_pricing_rules(pool).await?);
    cache.put_pricing_rules(rules.clone()).await;
    Ok(rules)
}

/// Price a validated stay against the stored rules
pub async fn quote_stored_stay(
    pool: &PgPool,
    cache: &AppCache,
    stay: &StayInterval,
) -> Result<PriceQuote, AppError> {
    let rules = load_pricing_rules(pool, cache).await?;
    let quote = quote_stay(stay.check_in(), stay.check_out(), &rules);
    debug!(
        "Quoted {} nights from {}: total {}",
        quote.night_count(),
        stay.check_in(),
        quote.total
    );
    Ok(quote)
}
