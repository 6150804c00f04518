//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::models::{PriceType, PricingRule, RuleError};

/// Request to quote a stay against the stored rules
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Request to price a stay against caller-supplied rules
#[derive(Debug, Deserialize)]
pub struct CalculatePriceRequest {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub rules: Vec<PricingRuleRequest>,
}

/// A pricing rule in the request, flat like the stored row
#[derive(Debug, Deserialize)]
pub struct PricingRuleRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    pub price_type: PriceType,
    #[serde(with = "rust_decimal::serde::str")]
    pub daily_rate: Decimal,
    #[serde(default)]
    pub min_nights: Option<i32>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<PricingRuleRequest> for PricingRule {
    type Error = RuleError;

    fn try_from(req: PricingRuleRequest) -> Result<Self, Self::Error> {
        PricingRule::from_parts(
            req.id.unwrap_or_else(Uuid::new_v4),
            req.name,
            req.price_type,
            req.daily_rate,
            req.min_nights,
            req.start_date,
            req.end_date,
            req.is_active,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::RuleKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_calculate_request() {
        let body = r#"{
            "check_in": "2025-12-24",
            "check_out": "2025-12-26",
            "rules": [
                {"price_type": "base", "daily_rate": "350.00"},
                {"price_type": "high_season", "daily_rate": "600",
                 "start_date": "2025-12-20", "end_date": "2026-01-10", "is_active": false}
            ]
        }"#;
        let req: CalculatePriceRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.rules.len(), 2);
        assert!(req.rules[0].is_active);
        assert!(!req.rules[1].is_active);

        let rules: Vec<PricingRule> = req
            .rules
            .into_iter()
            .map(PricingRule::try_from)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rules[0].kind, RuleKind::Base);
        assert_eq!(rules[0].daily_rate, dec!(350));
        assert_eq!(rules[1].price_type(), PriceType::HighSeason);
    }

    #[test]
    fn test_unknown_price_type_fails_to_parse() {
        let body = r#"{"price_type": "discount", "daily_rate": "1"}"#;
        assert!(serde_json::from_str::<PricingRuleRequest>(body).is_err());
    }
}
