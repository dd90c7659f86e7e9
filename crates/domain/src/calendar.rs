use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc, Weekday};
use serde::Serialize;

use crate::automation::WeekDay;

/// Milliseconds in one week.
pub const MILLIS_PER_WEEK: i64 = 604_800_000;

/// Returns the number of whole weeks since the Unix epoch.
#[must_use]
pub fn week_number_since_epoch(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis().div_euclid(MILLIS_PER_WEEK)
}

/// Calendar facts for one schedule fan-out pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFacts {
    /// Local calendar date.
    pub date: NaiveDate,
    /// Local day of week.
    pub day: WeekDay,
    /// Monday through Friday.
    pub is_weekday: bool,
    /// Epoch-relative week counter.
    pub week_number: i64,
}

impl CalendarFacts {
    /// Computes facts for an instant seen from a fixed UTC offset.
    #[must_use]
    pub fn from_instant(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        let local = instant.with_timezone(&offset);
        let day = week_day(local.weekday());

        Self {
            date: local.date_naive(),
            day,
            is_weekday: day.is_weekday(),
            week_number: week_number_since_epoch(instant),
        }
    }
}

fn week_day(weekday: Weekday) -> WeekDay {
    match weekday {
        Weekday::Sun => WeekDay::Sun,
        Weekday::Mon => WeekDay::Mon,
        Weekday::Tue => WeekDay::Tue,
        Weekday::Wed => WeekDay::Wed,
        Weekday::Thu => WeekDay::Thu,
        Weekday::Fri => WeekDay::Fri,
        Weekday::Sat => WeekDay::Sat,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, TimeZone, Utc};

    use super::{CalendarFacts, week_number_since_epoch};
    use crate::automation::WeekDay;

    #[test]
    fn tuesday_is_a_weekday() {
        let instant = Utc
            .with_ymd_and_hms(2026, 3, 3, 0, 5, 0)
            .single()
            .unwrap_or_else(|| unreachable!());
        let utc = FixedOffset::east_opt(0).unwrap_or_else(|| unreachable!());
        let facts = CalendarFacts::from_instant(instant, utc);

        assert_eq!(facts.day, WeekDay::Tue);
        assert_eq!(facts.day.index(), 2);
        assert!(facts.is_weekday);
    }

    #[test]
    fn offset_shifts_local_day() {
        let instant = Utc
            .with_ymd_and_hms(2026, 3, 3, 23, 30, 0)
            .single()
            .unwrap_or_else(|| unreachable!());
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap_or_else(|| unreachable!());
        let facts = CalendarFacts::from_instant(instant, plus_two);

        assert_eq!(facts.day, WeekDay::Wed);
        assert_eq!(facts.date.to_string(), "2026-03-04");
    }

    #[test]
    fn runs_seven_days_apart_differ_by_one_week() {
        let first = Utc
            .with_ymd_and_hms(2026, 3, 3, 0, 5, 0)
            .single()
            .unwrap_or_else(|| unreachable!());
        let second = first + Duration::days(7);

        assert_eq!(
            week_number_since_epoch(second) - week_number_since_epoch(first),
            1
        );
    }

    #[test]
    fn week_counter_floors_before_the_epoch() {
        let before_epoch = Utc
            .with_ymd_and_hms(1969, 12, 31, 23, 59, 59)
            .single()
            .unwrap_or_else(|| unreachable!());

        assert_eq!(week_number_since_epoch(before_epoch), -1);
    }
}
