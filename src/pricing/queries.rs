//! Database queries for pricing rules.

use sqlx::PgPool;

use crate::error::AppError;

use super::models::PricingRuleRow;

/// List active pricing rules, oldest first.
///
/// The order is part of the pricing contract: overlapping holiday and
/// high-season rules resolve to the first match.
pub async fn list_active_pricing_rules(pool: &PgPool) -> Result<Vec<PricingRuleRow>, AppError> {
    let rules = sqlx::query_as::<_, PricingRuleRow>(
        r#"
        SELECT
            id, name, price_type, daily_rate,
            min_nights, start_date, end_date,
            is_active, created_at
        FROM pricing_rules
        WHERE is_active = true
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rules)
}
