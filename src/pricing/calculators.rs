//! Core pricing calculation functions.
//!
//! Pure functions for nightly-rate math - no database access.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::pricing::models::{PriceType, PricingRule, RuleKind};
use crate::stay::{is_weekend, nights};

/// Nightly rate used when no active base rule exists.
pub const DEFAULT_BASE_RATE: Decimal = dec!(350.00);

/// Weekend rate multiplier applied to the base rate when no weekend rule exists.
pub const WEEKEND_MULTIPLIER: Decimal = dec!(1.2);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use rental_booking::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Which rule priced a night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Base,
    Weekend,
    Holiday(Uuid),
    HighSeason(Uuid),
    Package(Uuid),
}

impl RateSource {
    pub fn price_type(&self) -> PriceType {
        match self {
            RateSource::Base => PriceType::Base,
            RateSource::Weekend => PriceType::Weekend,
            RateSource::Holiday(_) => PriceType::Holiday,
            RateSource::HighSeason(_) => PriceType::HighSeason,
            RateSource::Package(_) => PriceType::Package,
        }
    }

    pub fn rule_id(&self) -> Option<Uuid> {
        match self {
            RateSource::Holiday(id) | RateSource::HighSeason(id) | RateSource::Package(id) => {
                Some(*id)
            }
            RateSource::Base | RateSource::Weekend => None,
        }
    }
}

/// Price of a single night.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NightCharge {
    pub date: NaiveDate,
    pub rate: Decimal,
    pub source: RateSource,
}

/// Full price of a stay with its per-night breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub base_rate: Decimal,
    pub weekend_rate: Decimal,
    pub nights: Vec<NightCharge>,
    pub applied_package: Option<Uuid>,
    pub total: Decimal,
}

impl PriceQuote {
    pub fn night_count(&self) -> usize {
        self.nights.len()
    }
}

/// Total price of the nights `[check_in, check_out)` under `rules`.
///
/// Returns zero when `check_out <= check_in`. Inactive rules are ignored.
/// Arithmetic saturates at `Decimal::MAX` instead of overflowing.
pub fn compute_total_price(
    check_in: NaiveDate,
    check_out: NaiveDate,
    rules: &[PricingRule],
) -> Decimal {
    quote_stay(check_in, check_out, rules).total
}

/// Price a stay night by night.
///
/// Precedence per night is holiday, high season, weekend, base. A qualifying
/// package replaces the per-night computation for the whole stay; the package
/// with the largest `min_nights` not exceeding the night count wins.
///
/// Overlapping holiday (or high-season) windows resolve to the first matching
/// rule in `rules` order.
pub fn quote_stay(check_in: NaiveDate, check_out: NaiveDate, rules: &[PricingRule]) -> PriceQuote {
    let base_rate = base_rate(rules);
    let weekend_rate = weekend_rate(rules, base_rate);
    let stay_nights = nights(check_in, check_out);

    let mut quote = PriceQuote {
        check_in,
        check_out,
        base_rate,
        weekend_rate,
        nights: Vec::with_capacity(stay_nights.len()),
        applied_package: None,
        total: Decimal::ZERO,
    };

    if stay_nights.is_empty() {
        return quote;
    }

    if let Some(package) = best_package(rules, stay_nights.len()) {
        quote.applied_package = Some(package.id);
        quote.nights = stay_nights
            .into_iter()
            .map(|date| NightCharge {
                date,
                rate: package.daily_rate,
                source: RateSource::Package(package.id),
            })
            .collect();
        quote.total = package
            .daily_rate
            .saturating_mul(Decimal::from(quote.nights.len()));
        return quote;
    }

    quote.nights = stay_nights
        .into_iter()
        .map(|date| night_charge(date, rules, base_rate, weekend_rate))
        .collect();
    quote.total = quote
        .nights
        .iter()
        .fold(Decimal::ZERO, |total, n| total.saturating_add(n.rate));
    quote
}

/// Rate of the first active base rule, or [`DEFAULT_BASE_RATE`].
pub fn base_rate(rules: &[PricingRule]) -> Decimal {
    active(rules)
        .find(|r| matches!(r.kind, RuleKind::Base))
        .map(|r| r.daily_rate)
        .unwrap_or(DEFAULT_BASE_RATE)
}

/// Rate of the first active weekend rule, or `base_rate * 1.2`.
pub fn weekend_rate(rules: &[PricingRule], base_rate: Decimal) -> Decimal {
    active(rules)
        .find(|r| matches!(r.kind, RuleKind::Weekend))
        .map(|r| r.daily_rate)
        .unwrap_or_else(|| base_rate.saturating_mul(WEEKEND_MULTIPLIER))
}

/// The qualifying package with the largest `min_nights`.
///
/// On equal `min_nights` the earlier rule is kept.
pub fn best_package(rules: &[PricingRule], night_count: usize) -> Option<&PricingRule> {
    let mut best: Option<(&PricingRule, u32)> = None;
    for rule in active(rules) {
        let RuleKind::Package { min_nights } = rule.kind else {
            continue;
        };
        if min_nights as usize > night_count {
            continue;
        }
        match best {
            Some((_, current)) if current >= min_nights => {}
            _ => best = Some((rule, min_nights)),
        }
    }
    best.map(|(rule, _)| rule)
}

/// Active rule types that appear more than once where the engine expects one.
///
/// Only `base` and `weekend` are single-valued; the engine uses the first of
/// each, so duplicates make the result depend on rule order.
pub fn singleton_conflicts(rules: &[PricingRule]) -> Vec<PriceType> {
    [PriceType::Base, PriceType::Weekend]
        .into_iter()
        .filter(|pt| active(rules).filter(|r| r.price_type() == *pt).count() > 1)
        .collect()
}

fn night_charge(
    date: NaiveDate,
    rules: &[PricingRule],
    base_rate: Decimal,
    weekend_rate: Decimal,
) -> NightCharge {
    let holiday = active(rules).find(|r| match &r.kind {
        RuleKind::Holiday(window) => window.contains(date),
        _ => false,
    });
    if let Some(rule) = holiday {
        return NightCharge {
            date,
            rate: rule.daily_rate,
            source: RateSource::Holiday(rule.id),
        };
    }

    let high_season = active(rules).find(|r| match &r.kind {
        RuleKind::HighSeason(window) => window.contains(date),
        _ => false,
    });
    if let Some(rule) = high_season {
        return NightCharge {
            date,
            rate: rule.daily_rate,
            source: RateSource::HighSeason(rule.id),
        };
    }

    if is_weekend(date) {
        NightCharge {
            date,
            rate: weekend_rate,
            source: RateSource::Weekend,
        }
    } else {
        NightCharge {
            date,
            rate: base_rate,
            source: RateSource::Base,
        }
    }
}

fn active(rules: &[PricingRule]) -> impl Iterator<Item = &PricingRule> {
    rules.iter().filter(|r| r.is_active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stay::DateWindow;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rule(kind: RuleKind, rate: Decimal) -> PricingRule {
        PricingRule {
            id: Uuid::new_v4(),
            name: format!("{:?}", kind.price_type()),
            kind,
            daily_rate: rate,
            is_active: true,
        }
    }

    fn inactive(mut r: PricingRule) -> PricingRule {
        r.is_active = false;
        r
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== empty stays ====================

    #[test]
    fn test_zero_night_stay_is_free() {
        let rules = vec![rule(RuleKind::Base, dec!(400))];
        assert_eq!(compute_total_price(d(2025, 3, 3), d(2025, 3, 3), &rules), dec!(0));
    }

    #[test]
    fn test_reversed_stay_is_free() {
        let rules = vec![rule(RuleKind::Base, dec!(400))];
        let quote = quote_stay(d(2025, 3, 5), d(2025, 3, 3), &rules);
        assert_eq!(quote.total, dec!(0));
        assert!(quote.nights.is_empty());
    }

    // ==================== base / weekend ====================

    #[test]
    fn test_single_weekday_night_uses_base_rate() {
        // 2025-06-10 is a Tuesday
        let rules = vec![rule(RuleKind::Base, dec!(410))];
        assert_eq!(compute_total_price(d(2025, 6, 10), d(2025, 6, 11), &rules), dec!(410));
    }

    #[test]
    fn test_saturday_without_weekend_rule_is_base_times_1_2() {
        // 2025-06-07 is a Saturday
        let rules = vec![rule(RuleKind::Base, dec!(400))];
        assert_eq!(
            compute_total_price(d(2025, 6, 7), d(2025, 6, 8), &rules),
            dec!(400) * dec!(1.2)
        );
    }

    #[test]
    fn test_no_rules_falls_back_to_default_base() {
        assert_eq!(compute_total_price(d(2025, 6, 10), d(2025, 6, 11), &[]), DEFAULT_BASE_RATE);
        assert_eq!(compute_total_price(d(2025, 6, 8), d(2025, 6, 9), &[]), dec!(420));
    }

    #[test]
    fn test_weekend_rule_overrides_multiplier() {
        let rules = vec![
            rule(RuleKind::Base, dec!(350)),
            rule(RuleKind::Weekend, dec!(500)),
        ];
        // Fri, Sat, Sun nights
        let quote = quote_stay(d(2025, 6, 6), d(2025, 6, 9), &rules);
        assert_eq!(quote.total, dec!(350) + dec!(500) + dec!(500));
        assert_eq!(quote.nights[1].source, RateSource::Weekend);
    }

    #[test]
    fn test_inactive_rules_are_ignored() {
        let rules = vec![
            inactive(rule(RuleKind::Base, dec!(999))),
            inactive(rule(RuleKind::Weekend, dec!(999))),
        ];
        assert_eq!(compute_total_price(d(2025, 6, 10), d(2025, 6, 11), &rules), dec!(350));
        assert_eq!(compute_total_price(d(2025, 6, 7), d(2025, 6, 8), &rules), dec!(420));
    }

    // ==================== holiday / high season ====================

    #[test]
    fn test_holiday_night_and_checkout_exclusion() {
        let rules = vec![
            rule(RuleKind::Base, dec!(350)),
            rule(
                RuleKind::Holiday(DateWindow::new(d(2025, 12, 25), d(2025, 12, 25))),
                dec!(500),
            ),
        ];
        assert_eq!(
            compute_total_price(d(2025, 12, 24), d(2025, 12, 26), &rules),
            dec!(850)
        );
    }

    #[test]
    fn test_holiday_beats_high_season_beats_weekend() {
        let season = rule(
            RuleKind::HighSeason(DateWindow::new(d(2025, 12, 20), d(2026, 1, 10))),
            dec!(600),
        );
        let holiday = rule(
            RuleKind::Holiday(DateWindow::new(d(2025, 12, 31), d(2026, 1, 1))),
            dec!(900),
        );
        let rules = vec![rule(RuleKind::Base, dec!(350)), season.clone(), holiday.clone()];

        // 2025-12-27 is a Saturday inside high season
        let quote = quote_stay(d(2025, 12, 27), d(2025, 12, 28), &rules);
        assert_eq!(quote.nights[0].source, RateSource::HighSeason(season.id));
        assert_eq!(quote.total, dec!(600));

        let quote = quote_stay(d(2025, 12, 30), d(2026, 1, 2), &rules);
        let sources: Vec<_> = quote.nights.iter().map(|n| n.source).collect();
        assert_eq!(
            sources,
            vec![
                RateSource::HighSeason(season.id),
                RateSource::Holiday(holiday.id),
                RateSource::Holiday(holiday.id),
            ]
        );
        assert_eq!(quote.total, dec!(600) + dec!(900) + dec!(900));
    }

    #[test]
    fn test_overlapping_holidays_first_in_input_order_wins() {
        let first = rule(
            RuleKind::Holiday(DateWindow::new(d(2025, 12, 24), d(2025, 12, 26))),
            dec!(700),
        );
        let second = rule(
            RuleKind::Holiday(DateWindow::new(d(2025, 12, 25), d(2025, 12, 25))),
            dec!(800),
        );
        let rules = vec![first.clone(), second];
        let quote = quote_stay(d(2025, 12, 25), d(2025, 12, 26), &rules);
        assert_eq!(quote.nights[0].source, RateSource::Holiday(first.id));
        assert_eq!(quote.total, dec!(700));
    }

    #[test]
    fn test_overlapping_high_seasons_first_in_input_order_wins() {
        let summer = rule(
            RuleKind::HighSeason(DateWindow::new(d(2025, 12, 15), d(2026, 2, 28))),
            dec!(550),
        );
        let new_year = rule(
            RuleKind::HighSeason(DateWindow::new(d(2025, 12, 26), d(2026, 1, 5))),
            dec!(750),
        );
        // 2025-12-29 and 30 are Monday and Tuesday
        let rules = vec![summer.clone(), new_year.clone()];
        let quote = quote_stay(d(2025, 12, 29), d(2025, 12, 31), &rules);
        assert!(quote
            .nights
            .iter()
            .all(|n| n.source == RateSource::HighSeason(summer.id)));
        assert_eq!(quote.total, dec!(1100));

        let rules = vec![new_year.clone(), summer];
        let quote = quote_stay(d(2025, 12, 29), d(2025, 12, 31), &rules);
        assert_eq!(quote.nights[0].source, RateSource::HighSeason(new_year.id));
        assert_eq!(quote.total, dec!(1500));
    }

    #[test]
    fn test_holiday_window_edges_are_inclusive() {
        let rules = vec![
            rule(RuleKind::Base, dec!(100)),
            rule(
                RuleKind::Holiday(DateWindow::new(d(2025, 4, 16), d(2025, 4, 17))),
                dec!(300),
            ),
        ];
        // Tue 15, Wed 16, Thu 17, Fri 18
        let quote = quote_stay(d(2025, 4, 15), d(2025, 4, 19), &rules);
        let rates: Vec<_> = quote.nights.iter().map(|n| n.rate).collect();
        assert_eq!(rates, vec![dec!(100), dec!(300), dec!(300), dec!(100)]);
    }

    // ==================== packages ====================

    #[test]
    fn test_package_replaces_per_night_sum() {
        let package = rule(RuleKind::Package { min_nights: 7 }, dec!(300));
        let rules = vec![rule(RuleKind::Base, dec!(400)), package.clone()];
        let quote = quote_stay(d(2025, 8, 1), d(2025, 8, 9), &rules);
        assert_eq!(quote.night_count(), 8);
        assert_eq!(quote.total, dec!(2400));
        assert_eq!(quote.applied_package, Some(package.id));
    }

    #[test]
    fn test_package_not_applied_below_min_nights() {
        let rules = vec![
            rule(RuleKind::Base, dec!(400)),
            rule(RuleKind::Package { min_nights: 7 }, dec!(300)),
        ];
        // Mon 4 to Sun 10: five weekday nights and one Saturday
        let quote = quote_stay(d(2025, 8, 4), d(2025, 8, 10), &rules);
        assert!(quote.applied_package.is_none());
        assert_eq!(quote.total, dec!(400) * dec!(5) + dec!(480));
    }

    #[test]
    fn test_largest_qualifying_package_wins() {
        let short = rule(RuleKind::Package { min_nights: 3 }, dec!(330));
        let long = rule(RuleKind::Package { min_nights: 7 }, dec!(280));
        let too_long = rule(RuleKind::Package { min_nights: 14 }, dec!(200));
        let rules = vec![short.clone(), too_long, long.clone()];

        assert_eq!(best_package(&rules, 10).map(|r| r.id), Some(long.id));
        assert_eq!(best_package(&rules, 4).map(|r| r.id), Some(short.id));
        assert!(best_package(&rules, 2).is_none());
        assert_eq!(compute_total_price(d(2025, 8, 1), d(2025, 8, 11), &rules), dec!(2800));
    }

    #[test]
    fn test_package_overrides_holidays() {
        let rules = vec![
            rule(
                RuleKind::Holiday(DateWindow::new(d(2025, 12, 24), d(2025, 12, 31))),
                dec!(900),
            ),
            rule(RuleKind::Package { min_nights: 5 }, dec!(450)),
        ];
        assert_eq!(
            compute_total_price(d(2025, 12, 24), d(2025, 12, 30), &rules),
            dec!(450) * dec!(6)
        );
    }

    #[test]
    fn test_inactive_package_is_ignored() {
        let rules = vec![
            rule(RuleKind::Base, dec!(100)),
            inactive(rule(RuleKind::Package { min_nights: 2 }, dec!(1))),
        ];
        assert_eq!(compute_total_price(d(2025, 6, 9), d(2025, 6, 12), &rules), dec!(300));
    }

    #[test]
    fn test_equal_min_nights_keeps_earlier_package() {
        let first = rule(RuleKind::Package { min_nights: 7 }, dec!(300));
        let second = rule(RuleKind::Package { min_nights: 7 }, dec!(250));
        let rules = vec![first.clone(), second.clone()];
        assert_eq!(best_package(&rules, 7).map(|r| r.id), Some(first.id));

        let reversed = vec![second.clone(), first];
        assert_eq!(best_package(&reversed, 7).map(|r| r.id), Some(second.id));
    }

    // ==================== overflow ====================

    #[test]
    fn test_huge_base_rate_saturates_instead_of_panicking() {
        let rules = vec![rule(RuleKind::Base, Decimal::MAX)];
        // weekday night: the derived weekend rate must not overflow either
        let quote = quote_stay(d(2025, 6, 10), d(2025, 6, 11), &rules);
        assert_eq!(quote.total, Decimal::MAX);
        assert_eq!(quote.weekend_rate, Decimal::MAX);

        assert_eq!(compute_total_price(d(2025, 6, 9), d(2025, 6, 16), &rules), Decimal::MAX);
    }

    #[test]
    fn test_huge_package_rate_saturates() {
        let rules = vec![rule(RuleKind::Package { min_nights: 2 }, Decimal::MAX)];
        assert_eq!(compute_total_price(d(2025, 6, 9), d(2025, 6, 12), &rules), Decimal::MAX);
    }

    // ==================== singleton conflicts ====================

    #[test]
    fn test_singleton_conflicts_reports_duplicate_base() {
        let rules = vec![
            rule(RuleKind::Base, dec!(100)),
            rule(RuleKind::Base, dec!(200)),
            rule(RuleKind::Weekend, dec!(300)),
            inactive(rule(RuleKind::Weekend, dec!(400))),
        ];
        assert_eq!(singleton_conflicts(&rules), vec![PriceType::Base]);
        // first active base rule is the one used
        assert_eq!(base_rate(&rules), dec!(100));
    }
}
