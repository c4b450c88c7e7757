//! Dense daily series from sparse per-day counts

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

use super::clock::DayWindow;

/// One chart point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Localized label shown under the bar
    pub day: String,
    pub count: i64,
}

/// How chart days are labelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    /// Short weekday: "Pzt"
    Weekday,
    /// Day of month and short month: "5 Oca"
    DayMonth,
}

const TR_WEEKDAYS: [&str; 7] = ["Pzt", "Sal", "Çar", "Per", "Cum", "Cmt", "Paz"];
const TR_MONTHS: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];

impl DayLabel {
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            Self::Weekday => weekday_tr(date.weekday()).to_string(),
            Self::DayMonth => format!("{} {}", date.day(), TR_MONTHS[date.month0() as usize]),
        }
    }
}

fn weekday_tr(day: Weekday) -> &'static str {
    TR_WEEKDAYS[day.num_days_from_monday() as usize]
}

/// Produce exactly `window.days` entries, oldest first, one per calendar day.
///
/// Days missing from `counts` get zero; dates outside the window are ignored.
pub fn fill_missing_days(
    window: &DayWindow,
    counts: &HashMap<NaiveDate, i64>,
    label: DayLabel,
) -> Vec<DailyCount> {
    (0..window.days)
        .filter_map(|i| window.first.checked_add_days(Days::new(u64::from(i))))
        .map(|date| DailyCount {
            date: date.format("%Y-%m-%d").to_string(),
            day: label.format(date),
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
