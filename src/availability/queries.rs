//! Database queries for blocked dates.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::AppError;

use super::models::BlockedDateRow;

/// List every blocked date range
pub async fn list_blocked_dates(pool: &PgPool) -> Result<Vec<BlockedDateRow>, AppError> {
    let rows = sqlx::query_as::<_, BlockedDateRow>(
        r#"
        SELECT id, start_date, end_date, reason, created_at
        FROM blocked_dates
        ORDER BY start_date, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// List blocked ranges that touch the inclusive window `[from, to]`.
///
/// Boundaries are compared on their UTC calendar day, matching
/// `BlockedDateRange::from_stored_bounds`.
pub async fn list_blocked_dates_between(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<BlockedDateRow>, AppError> {
    let rows = sqlx::query_as::<_, BlockedDateRow>(
        r#"
        SELECT id, start_date, end_date, reason, created_at
        FROM blocked_dates
        WHERE (start_date AT TIME ZONE 'UTC')::date <= $2
          AND (end_date AT TIME ZONE 'UTC')::date >= $1
        ORDER BY start_date, id
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
