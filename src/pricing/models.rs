//! Pricing rule models.
//!
//! `PricingRuleRow` is the flat record read from the `pricing_rules` table.
//! `PricingRule` is the engine's view, with the fields each rule type needs
//! carried by its `RuleKind` variant.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::stay::DateWindow;

/// Highest nightly rate a rule may carry.
pub const MAX_DAILY_RATE: Decimal = dec!(1000000000);

/// Discriminator stored in `pricing_rules.price_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    Base,
    Weekend,
    Holiday,
    HighSeason,
    Package,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Base => "base",
            PriceType::Weekend => "weekend",
            PriceType::Holiday => "holiday",
            PriceType::HighSeason => "high_season",
            PriceType::Package => "package",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(PriceType::Base),
            "weekend" => Ok(PriceType::Weekend),
            "holiday" => Ok(PriceType::Holiday),
            "high_season" => Ok(PriceType::HighSeason),
            "package" => Ok(PriceType::Package),
            other => Err(RuleError::UnknownPriceType(other.to_string())),
        }
    }
}

/// Why a stored rule cannot be used by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("unknown price type '{0}'")]
    UnknownPriceType(String),

    #[error("{price_type} rule {id} needs both start_date and end_date")]
    MissingWindow { id: Uuid, price_type: PriceType },

    #[error("package rule {0} needs a positive min_nights")]
    MissingMinNights(Uuid),

    #[error("rule {0} has a negative daily rate")]
    NegativeRate(Uuid),

    #[error("rule {0} has a daily rate above the allowed maximum")]
    RateTooLarge(Uuid),
}

/// Per-type payload of a pricing rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Base,
    Weekend,
    Holiday(DateWindow),
    HighSeason(DateWindow),
    Package { min_nights: u32 },
}

impl RuleKind {
    pub fn price_type(&self) -> PriceType {
        match self {
            RuleKind::Base => PriceType::Base,
            RuleKind::Weekend => PriceType::Weekend,
            RuleKind::Holiday(_) => PriceType::Holiday,
            RuleKind::HighSeason(_) => PriceType::HighSeason,
            RuleKind::Package { .. } => PriceType::Package,
        }
    }
}

/// A pricing rule as consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingRule {
    pub id: Uuid,
    pub name: String,
    pub kind: RuleKind,
    pub daily_rate: Decimal,
    pub is_active: bool,
}

impl PricingRule {
    pub fn price_type(&self) -> PriceType {
        self.kind.price_type()
    }

    /// Build an engine rule from the flat stored fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: Uuid,
        name: String,
        price_type: PriceType,
        daily_rate: Decimal,
        min_nights: Option<i32>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        is_active: bool,
    ) -> Result<Self, RuleError> {
        if daily_rate < Decimal::ZERO {
            return Err(RuleError::NegativeRate(id));
        }
        if daily_rate > MAX_DAILY_RATE {
            return Err(RuleError::RateTooLarge(id));
        }

        let window = || match (start_date, end_date) {
            (Some(start), Some(end)) => Ok(DateWindow::new(start, end)),
            _ => Err(RuleError::MissingWindow { id, price_type }),
        };

        let kind = match price_type {
            PriceType::Base => RuleKind::Base,
            PriceType::Weekend => RuleKind::Weekend,
            PriceType::Holiday => RuleKind::Holiday(window()?),
            PriceType::HighSeason => RuleKind::HighSeason(window()?),
            PriceType::Package => match min_nights {
                Some(n) if n > 0 => RuleKind::Package {
                    min_nights: n as u32,
                },
                _ => return Err(RuleError::MissingMinNights(id)),
            },
        };

        Ok(Self {
            id,
            name,
            kind,
            daily_rate,
            is_active,
        })
    }
}

/// Row from `pricing_rules`.
#[derive(Debug, Clone, FromRow)]
pub struct PricingRuleRow {
    pub id: Uuid,
    pub name: String,
    pub price_type: String,
    pub daily_rate: Decimal,
    pub min_nights: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PricingRuleRow> for PricingRule {
    type Error = RuleError;

    fn try_from(row: PricingRuleRow) -> Result<Self, Self::Error> {
        let price_type = row.price_type.parse::<PriceType>()?;
        PricingRule::from_parts(
            row.id,
            row.name,
            price_type,
            row.daily_rate,
            row.min_nights,
            row.start_date,
            row.end_date,
            row.is_active,
        )
    }
}
