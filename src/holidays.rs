//! National public holidays (Brazil) for calendar highlighting.
//!
//! This list is a presentational overlay for the booking calendar. It plays no
//! part in pricing; admin-configured `holiday` pricing rules are the only
//! holiday input the pricing engine reads.

use chrono::{Days, NaiveDate};
use serde::Serialize;

/// A named public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicHoliday {
    pub date: NaiveDate,
    pub name: &'static str,
}

/// Fixed-date civil holidays as (month, day, name).
const FIXED_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 1, "Confraternização Universal"),
    (4, 21, "Tiradentes"),
    (5, 1, "Dia do Trabalho"),
    (9, 7, "Independência do Brasil"),
    (10, 12, "Nossa Senhora Aparecida"),
    (11, 2, "Finados"),
    (11, 15, "Proclamação da República"),
    (12, 25, "Natal"),
];

/// Dia da Consciência Negra became a national holiday in 2024.
const BLACK_CONSCIOUSNESS_DAY_SINCE: i32 = 2024;

/// Easter Sunday for a Gregorian year (anonymous Gregorian / Gauss computus).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// All public holidays of `year`, sorted by date.
///
/// Returns an empty list for years chrono cannot represent.
pub fn public_holidays(year: i32) -> Vec<PublicHoliday> {
    let mut holidays: Vec<PublicHoliday> = FIXED_HOLIDAYS
        .iter()
        .filter_map(|&(month, day, name)| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| PublicHoliday { date, name })
        })
        .collect();

    if year >= BLACK_CONSCIOUSNESS_DAY_SINCE {
        if let Some(date) = NaiveDate::from_ymd_opt(year, 11, 20) {
            holidays.push(PublicHoliday {
                date,
                name: "Dia da Consciência Negra",
            });
        }
    }

    if let Some(easter) = easter_sunday(year) {
        let movable = [
            (easter.checked_sub_days(Days::new(47)), "Carnaval"),
            (easter.checked_sub_days(Days::new(2)), "Sexta-feira Santa"),
            (easter.checked_add_days(Days::new(60)), "Corpus Christi"),
        ];
        holidays.extend(
            movable
                .into_iter()
                .filter_map(|(date, name)| date.map(|date| PublicHoliday { date, name })),
        );
    }

    holidays.sort_by_key(|h| h.date);
    holidays
}
