use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use lanewright_core::{AppError, AppResult};

/// Daily tick at a local wall-clock time in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    offset: FixedOffset,
    run_at: NaiveTime,
}

impl DailySchedule {
    pub fn new(offset: FixedOffset, run_at: NaiveTime) -> Self {
        Self { offset, run_at }
    }

    /// Returns the tick on the local date of `now`, which may lie in the past.
    ///
    /// Workers start with this instant so a pass missed while offline runs
    /// on startup; fan-out checkpoints keep it from dispatching twice.
    pub fn tick_on_local_date_of(&self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        self.tick_on(now.with_timezone(&self.offset).date_naive())
    }

    /// Returns the first tick strictly after `now`.
    pub fn next_tick_after(&self, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
        let today = now.with_timezone(&self.offset).date_naive();
        let tick = self.tick_on(today)?;
        if tick > now {
            return Ok(tick);
        }

        let tomorrow = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::Internal(format!("no calendar day after {today}")))?;
        self.tick_on(tomorrow)
    }

    fn tick_on(&self, date: NaiveDate) -> AppResult<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&date.and_time(self.run_at))
            .single()
            .map(|local| local.with_timezone(&Utc))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "schedule time {} on {date} is not representable",
                    self.run_at
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

    use super::DailySchedule;

    fn instant(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .map(|instant| instant.with_timezone(&Utc))
            .unwrap_or_else(|_| unreachable!())
    }

    fn schedule(offset_hours: i32, hour: u32, minute: u32) -> DailySchedule {
        DailySchedule::new(
            FixedOffset::east_opt(offset_hours * 3600).unwrap_or_else(|| unreachable!()),
            NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_else(|| unreachable!()),
        )
    }

    #[test]
    fn next_tick_is_later_today_or_tomorrow() {
        let utc = schedule(0, 0, 5);

        assert_eq!(
            utc.next_tick_after(instant("2026-03-03T00:01:00Z")).ok(),
            Some(instant("2026-03-03T00:05:00Z"))
        );
        assert_eq!(
            utc.next_tick_after(instant("2026-03-03T00:05:00Z")).ok(),
            Some(instant("2026-03-04T00:05:00Z"))
        );
    }

    #[test]
    fn ticks_follow_the_local_calendar() {
        let sydney = schedule(10, 0, 5);

        // 20:00 UTC on the 3rd is already the 4th in UTC+10.
        let now = instant("2026-03-03T20:00:00Z");
        assert_eq!(
            sydney.tick_on_local_date_of(now).ok(),
            Some(instant("2026-03-03T14:05:00Z"))
        );
        assert_eq!(
            sydney.next_tick_after(now).ok(),
            Some(instant("2026-03-04T14:05:00Z"))
        );
    }
}
