//! Availability service functions with database access.

use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use crate::cache::AppCache;
use crate::error::AppError;

use super::models::BlockedDateRange;
use super::queries;

/// Read every blocked range from the database, bypassing the cache
pub async fn fetch_blocked_ranges(pool: &PgPool) -> Result<Vec<BlockedDateRange>, AppError> {
    let rows = queries::list_blocked_dates(pool).await?;
    Ok(rows.into_iter().map(BlockedDateRange::from).collect())
}

/// All blocked ranges, from cache when present
pub async fn load_blocked_ranges(
    pool: &PgPool,
    cache: &AppCache,
) -> Result<Arc<Vec<BlockedDateRange>>, AppError> {
    if let Some(ranges) = cache.get_blocked_ranges().await {
        debug!("Cache HIT for blocked ranges");
        return Ok(ranges);
    }

    debug!("Cache MISS for blocked ranges");
    let ranges = Arc::new(fetch_blocked_ranges(pool).await?);
    cache.put_blocked_ranges(ranges.clone()).await;
    Ok(ranges)
}

/// Blocked ranges touching `[from, to]`, read straight from the database
pub async fn blocked_ranges_between(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<BlockedDateRange>, AppError> {
    let rows = queries::list_blocked_dates_between(pool, from, to).await?;
    Ok(rows.into_iter().map(BlockedDateRange::from).collect())
}
