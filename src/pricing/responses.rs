//! Response DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{round_money, NightCharge, PriceQuote};
use super::models::PriceType;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    /// Rounded to cents
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount: round_money(amount, 2),
            currency: currency.to_string(),
        }
    }
}

/// One priced night
#[derive(Debug, Serialize)]
pub struct NightChargeResponse {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub price_type: PriceType,
    pub rule_id: Option<Uuid>,
}

impl From<&NightCharge> for NightChargeResponse {
    fn from(night: &NightCharge) -> Self {
        Self {
            date: night.date,
            rate: round_money(night.rate, 2),
            price_type: night.source.price_type(),
            rule_id: night.source.rule_id(),
        }
    }
}

/// Response for a stay quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: usize,
    pub base_rate: MoneyResponse,
    pub weekend_rate: MoneyResponse,
    pub total: MoneyResponse,
    pub applied_package: Option<Uuid>,
    pub breakdown: Vec<NightChargeResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicting_dates: Vec<NaiveDate>,
}

impl QuoteResponse {
    pub fn from_quote(quote: &PriceQuote, currency: &str) -> Self {
        Self {
            check_in: quote.check_in,
            check_out: quote.check_out,
            nights: quote.night_count(),
            base_rate: MoneyResponse::new(quote.base_rate, currency),
            weekend_rate: MoneyResponse::new(quote.weekend_rate, currency),
            total: MoneyResponse::new(quote.total, currency),
            applied_package: quote.applied_package,
            breakdown: quote.nights.iter().map(NightChargeResponse::from).collect(),
            available: None,
            conflicting_dates: Vec::new(),
        }
    }

    /// Attach availability of the quoted nights
    pub fn with_conflicts(mut self, conflicts: Vec<NaiveDate>) -> Self {
        self.available = Some(conflicts.is_empty());
        self.conflicting_dates = conflicts;
        self
    }
}
