//! In-memory caching using moka
//!
//! Holds the active pricing rules and blocked date ranges read from the
//! database, plus the per-year public holiday lists.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::availability::{self, BlockedDateRange};
use crate::holidays::{self, PublicHoliday};
use crate::pricing::{self, PricingRule};

const RULES_KEY: &str = "active";
const BLOCKED_KEY: &str = "all";

/// Application cache
#[derive(Clone)]
pub struct AppCache {
    /// Active pricing rules in store order (singleton)
    pub pricing_rules: Cache<&'static str, Arc<Vec<PricingRule>>>,
    /// Blocked date ranges (singleton)
    pub blocked_ranges: Cache<&'static str, Arc<Vec<BlockedDateRange>>>,
    /// Public holidays (year -> list)
    pub holidays: Cache<i32, Arc<Vec<PublicHoliday>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Rules change only from the admin dashboard: 5 min TTL
            pricing_rules: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),

            // Blocks follow reservations, keep them fresh: 1 min TTL
            blocked_ranges: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(60))
                .build(),

            // Holidays are a pure function of the year
            holidays: Cache::builder().max_capacity(32).build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pricing_rules_cached: self.pricing_rules.entry_count() > 0,
            blocked_ranges_cached: self.blocked_ranges.entry_count() > 0,
            holiday_years: self.holidays.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.pricing_rules.invalidate_all();
        self.blocked_ranges.invalidate_all();
        self.holidays.invalidate_all();
        info!("All caches invalidated");
    }

    pub async fn get_pricing_rules(&self) -> Option<Arc<Vec<PricingRule>>> {
        self.pricing_rules.get(RULES_KEY).await
    }

    pub async fn put_pricing_rules(&self, rules: Arc<Vec<PricingRule>>) {
        self.pricing_rules.insert(RULES_KEY, rules).await;
    }

    pub async fn get_blocked_ranges(&self) -> Option<Arc<Vec<BlockedDateRange>>> {
        self.blocked_ranges.get(BLOCKED_KEY).await
    }

    pub async fn put_blocked_ranges(&self, ranges: Arc<Vec<BlockedDateRange>>) {
        self.blocked_ranges.insert(BLOCKED_KEY, ranges).await;
    }

    /// Public holidays of `year`, computed once per year
    pub async fn holidays_for(&self, year: i32) -> Arc<Vec<PublicHoliday>> {
        self.holidays
            .get_with(year, async move { Arc::new(holidays::public_holidays(year)) })
            .await
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub pricing_rules_cached: bool,
    pub blocked_ranges_cached: bool,
    pub holiday_years: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every minute, ahead of the
/// blocked-range TTL.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    let mut interval = interval(Duration::from_secs(60));
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with the data every quote needs
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    match pricing::services::fetch_pricing_rules(db).await {
        Ok(rules) => cache.put_pricing_rules(Arc::new(rules)).await,
        Err(e) => warn!("Failed to warm pricing rule cache: {}", e),
    }

    match availability::services::fetch_blocked_ranges(db).await {
        Ok(ranges) => cache.put_blocked_ranges(Arc::new(ranges)).await,
        Err(e) => warn!("Failed to warm blocked date cache: {}", e),
    }

    tracing::debug!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_holidays_are_memoized_per_year() {
        let cache = AppCache::new();
        let first = cache.holidays_for(2025).await;
        let second = cache.holidays_for(2025).await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, holidays::public_holidays(2025));
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_rules() {
        let cache = AppCache::new();
        cache.put_pricing_rules(Arc::new(Vec::new())).await;
        assert!(cache.get_pricing_rules().await.is_some());
        cache.invalidate_all();
        assert!(cache.get_pricing_rules().await.is_none());
    }
}
