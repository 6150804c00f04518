//! Pricing engine module.
//!
//! Computes the price of a stay from the property's pricing rules: base,
//! weekend, holiday, high-season and package rates.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    compute_total_price, quote_stay, round_money, NightCharge, PriceQuote, RateSource,
};
pub use models::{PriceType, PricingRule, RuleError, RuleKind};
pub use routes::router;
