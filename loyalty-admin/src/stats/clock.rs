//! Fixed-offset calendar used for every dashboard boundary
//!
//! The panel and the database live in different time zones; bucketing on a
//! single fixed offset keeps "today" and each chart day identical for both.

use chrono::{Datelike, Days, FixedOffset, NaiveDate, NaiveTime};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy)]
pub struct StatsClock {
    offset: FixedOffset,
}

/// A run of `days` consecutive local days starting on `first`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub first: NaiveDate,
    pub days: u32,
    /// UTC millis of local midnight at the start of `first`
    pub start_millis: i64,
}

impl StatsClock {
    pub fn new(offset_minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(offset_minutes * 60).map(|offset| Self { offset })
    }

    /// Offset in milliseconds, as bound into bucketing SQL
    pub fn offset_millis(&self) -> i64 {
        i64::from(self.offset.local_minus_utc()) * 1000
    }

    /// Local calendar date of a UTC millisecond timestamp
    pub fn local_date(&self, utc_millis: i64) -> NaiveDate {
        bucket_to_date(self.bucket(utc_millis)).unwrap_or_default()
    }

    /// Local epoch-day of a UTC millisecond timestamp (same formula as SQL)
    pub fn bucket(&self, utc_millis: i64) -> i64 {
        (utc_millis + self.offset_millis()).div_euclid(MILLIS_PER_DAY)
    }

    /// UTC millis of local midnight starting `date`
    pub fn start_of_day(&self, date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() - self.offset_millis()
    }

    /// UTC millis of local midnight on the first day of `date`'s month
    pub fn start_of_month(&self, date: NaiveDate) -> i64 {
        let first = date.with_day(1).unwrap_or(date);
        self.start_of_day(first)
    }

    /// The `days`-long window ending on the local day containing `now_millis`
    pub fn window_ending(&self, now_millis: i64, days: u32) -> DayWindow {
        let last = self.local_date(now_millis);
        let back = u64::from(days.saturating_sub(1));
        let first = last.checked_sub_days(Days::new(back)).unwrap_or(last);
        DayWindow {
            first,
            days,
            start_millis: self.start_of_day(first),
        }
    }
}

/// Map a local epoch-day (as produced by SQL bucketing) back to a date
pub fn bucket_to_date(bucket: i64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    if bucket >= 0 {
        epoch.checked_add_days(Days::new(bucket as u64))
    } else {
        epoch.checked_sub_days(Days::new(bucket.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn istanbul() -> StatsClock {
        StatsClock::new(180).unwrap()
    }

    fn utc_millis(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_late_utc_evening_is_next_local_day() {
        let clock = istanbul();
        // 22:30 UTC = 01:30 next day in +03:00
        assert_eq!(clock.local_date(utc_millis(2026, 3, 9, 22, 30)), date(2026, 3, 10));
        assert_eq!(clock.local_date(utc_millis(2026, 3, 9, 20, 59)), date(2026, 3, 9));
    }

    #[test]
    fn test_start_of_day_is_local_midnight() {
        let clock = istanbul();
        assert_eq!(
            clock.start_of_day(date(2026, 3, 10)),
            utc_millis(2026, 3, 9, 21, 0)
        );
        assert_eq!(
            clock.start_of_month(date(2026, 3, 10)),
            utc_millis(2026, 2, 28, 21, 0)
        );
    }

    #[test]
    fn test_bucket_roundtrips_through_date() {
        let clock = istanbul();
        let ts = utc_millis(2026, 10, 19, 23, 15);
        let bucket = clock.bucket(ts);
        assert_eq!(bucket_to_date(bucket), Some(date(2026, 10, 20)));
        assert_eq!(bucket_to_date(0), Some(date(1970, 1, 1)));
    }

    #[test]
    fn test_window_ending_covers_exact_days() {
        let clock = istanbul();
        let now = utc_millis(2026, 1, 3, 12, 0);
        let w = clock.window_ending(now, 7);
        assert_eq!(w.first, date(2025, 12, 28));
        assert_eq!(w.days, 7);
        assert_eq!(w.start_millis, clock.start_of_day(date(2025, 12, 28)));

        let single = clock.window_ending(now, 1);
        assert_eq!(single.first, date(2026, 1, 3));
    }

    #[test]
    fn test_negative_offset() {
        let clock = StatsClock::new(-300).unwrap();
        assert_eq!(clock.offset_millis(), -5 * 3_600_000);
        assert_eq!(clock.local_date(utc_millis(2026, 3, 10, 3, 0)), date(2026, 3, 9));
    }
}
