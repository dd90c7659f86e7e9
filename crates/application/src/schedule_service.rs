use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use lanewright_core::AppResult;
use lanewright_domain::{CalendarFacts, DailyInterval, DomainEvent, EventEnvelope};
use serde::Serialize;

use crate::automation_ports::{EventTransport, RuleRepository, StepJournal};
use crate::step_checkpoint::run_step;

#[cfg(test)]
mod tests;

/// Result of one daily schedule fan-out pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FanOutSummary {
    /// Local date the pass ran for.
    pub date: NaiveDate,
    /// Boards with a daily rule.
    pub daily_boards: usize,
    /// Boards with a weekly rule.
    pub weekly_boards: usize,
    /// Boards with an every-N-weeks rule.
    pub x_weeks_boards: usize,
    /// Events handed to the transport for this date.
    pub events_dispatched: usize,
    /// No board had a scheduled rule, so nothing was dispatched.
    pub skipped: bool,
}

/// Turns the daily tick into per-board scheduled events.
#[derive(Clone)]
pub struct ScheduleService {
    rules: Arc<dyn RuleRepository>,
    transport: Arc<dyn EventTransport>,
    journal: Arc<dyn StepJournal>,
    utc_offset: FixedOffset,
}

impl ScheduleService {
    /// Creates a schedule service evaluating calendar facts at `utc_offset`.
    #[must_use]
    pub fn new(
        rules: Arc<dyn RuleRepository>,
        transport: Arc<dyn EventTransport>,
        journal: Arc<dyn StepJournal>,
        utc_offset: FixedOffset,
    ) -> Self {
        Self {
            rules,
            transport,
            journal,
            utc_offset,
        }
    }

    /// Emits the scheduled events due on the local date of `now`.
    ///
    /// The batch is checkpointed per date, so a retried pass for the same
    /// date reports the recorded dispatch instead of emitting again.
    pub async fn run_daily_fan_out(&self, now: DateTime<Utc>) -> AppResult<FanOutSummary> {
        let facts = CalendarFacts::from_instant(now, self.utc_offset);
        let index = self.rules.scheduled_rule_index().await?;
        let date = facts.date.format("%Y-%m-%d").to_string();

        let mut envelopes = Vec::new();
        for board_id in &index.daily {
            let mut intervals = vec![DailyInterval::Day];
            if facts.is_weekday {
                intervals.push(DailyInterval::Weekday);
            }

            for interval in intervals {
                envelopes.push(EventEnvelope::with_id(
                    format!("scheduled:daily:{board_id}:{date}:{}", interval.as_str()),
                    DomainEvent::ScheduledDaily {
                        board_id: *board_id,
                        interval,
                    },
                    now,
                ));
            }
        }

        for board_id in &index.weekly {
            envelopes.push(EventEnvelope::with_id(
                format!("scheduled:weekly:{board_id}:{date}"),
                DomainEvent::ScheduledWeekly {
                    board_id: *board_id,
                    day: facts.day,
                },
                now,
            ));
        }

        for board_id in &index.x_weeks {
            envelopes.push(EventEnvelope::with_id(
                format!("scheduled:x-weeks:{board_id}:{date}"),
                DomainEvent::ScheduledXWeeks {
                    board_id: *board_id,
                    day: facts.day,
                    week_number: facts.week_number,
                },
                now,
            ));
        }

        let mut summary = FanOutSummary {
            date: facts.date,
            daily_boards: index.daily.len(),
            weekly_boards: index.weekly.len(),
            x_weeks_boards: index.x_weeks.len(),
            events_dispatched: 0,
            skipped: index.is_empty(),
        };

        if summary.skipped {
            tracing::info!(date = date.as_str(), "no scheduled rules due");
            return Ok(summary);
        }

        let count = envelopes.len();
        let task_key = format!("fan-out:{date}");
        summary.events_dispatched = run_step(
            self.journal.as_ref(),
            task_key.as_str(),
            "dispatch",
            async {
                self.transport.emit_batch(envelopes).await?;
                Ok(count)
            },
        )
        .await?;

        tracing::info!(
            date = date.as_str(),
            day = facts.day.token(),
            week_number = facts.week_number,
            daily_boards = summary.daily_boards,
            weekly_boards = summary.weekly_boards,
            x_weeks_boards = summary.x_weeks_boards,
            events_dispatched = summary.events_dispatched,
            "schedule fan-out dispatched"
        );

        Ok(summary)
    }
}
