use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use lanewright_core::{BoardId, ListId};
use lanewright_domain::{
    ActionPayload, DailyInterval, DomainEvent, ListPlacement, Rule, RuleDetails, TriggerPayload,
    WeekDay,
};

use crate::test_support::{FakeEventTransport, FakeRuleRepository, FakeStepJournal, instant, rule};

use super::ScheduleService;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap_or_else(|| unreachable!())
}

fn tuesday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 3, 0, 5, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
}

fn scheduled_rule(board_id: BoardId, trigger: TriggerPayload) -> Rule {
    let details = RuleDetails::new(
        trigger,
        vec![ActionPayload::MoveSelectedList {
            list_id: ListId::new(),
            position: ListPlacement::First,
        }],
    )
    .unwrap_or_else(|_| unreachable!());

    rule(board_id, "u1", details, instant(1))
}

struct Harness {
    rules: Arc<FakeRuleRepository>,
    transport: Arc<FakeEventTransport>,
    journal: Arc<FakeStepJournal>,
    service: ScheduleService,
}

fn harness(offset: FixedOffset) -> Harness {
    let rules = Arc::new(FakeRuleRepository::default());
    let transport = Arc::new(FakeEventTransport::default());
    let journal = Arc::new(FakeStepJournal::default());
    let service = ScheduleService::new(rules.clone(), transport.clone(), journal.clone(), offset);

    Harness {
        rules,
        transport,
        journal,
        service,
    }
}

#[tokio::test]
async fn tuesday_fan_out_emits_daily_weekday_and_weekly_events() {
    let harness = harness(utc());
    let daily_board = BoardId::new();
    let weekly_board = BoardId::new();
    harness
        .rules
        .insert(scheduled_rule(
            daily_board,
            TriggerPayload::WhenScheduledDaily {
                interval: DailyInterval::Weekday,
            },
        ))
        .await;
    harness
        .rules
        .insert(scheduled_rule(
            weekly_board,
            TriggerPayload::WhenScheduledWeekly { day: WeekDay::Fri },
        ))
        .await;

    let summary = harness
        .service
        .run_daily_fan_out(tuesday())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(summary.date.to_string(), "2026-03-03");
    assert_eq!((summary.daily_boards, summary.weekly_boards, summary.x_weeks_boards), (1, 1, 0));
    assert_eq!(summary.events_dispatched, 3);
    assert!(!summary.skipped);

    let batches = harness.transport.batches().await;
    assert_eq!(batches.len(), 1);
    let ids: Vec<&str> = batches[0].iter().map(|envelope| envelope.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            format!("scheduled:daily:{daily_board}:2026-03-03:DAY"),
            format!("scheduled:daily:{daily_board}:2026-03-03:WEEKDAY"),
            format!("scheduled:weekly:{weekly_board}:2026-03-03"),
        ]
    );
    assert!(matches!(
        batches[0][2].event,
        DomainEvent::ScheduledWeekly {
            day: WeekDay::Tue,
            ..
        }
    ));
}

#[tokio::test]
async fn weekend_daily_fan_out_skips_weekday_pass() {
    let harness = harness(utc());
    let board_id = BoardId::new();
    harness
        .rules
        .insert(scheduled_rule(
            board_id,
            TriggerPayload::WhenScheduledDaily {
                interval: DailyInterval::Day,
            },
        ))
        .await;
    let saturday = Utc
        .with_ymd_and_hms(2026, 3, 7, 12, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!());

    harness
        .service
        .run_daily_fan_out(saturday)
        .await
        .unwrap_or_else(|_| unreachable!());

    let envelopes = harness.transport.envelopes().await;
    assert_eq!(envelopes.len(), 1);
    assert!(matches!(
        envelopes[0].event,
        DomainEvent::ScheduledDaily {
            interval: DailyInterval::Day,
            ..
        }
    ));
}

#[tokio::test]
async fn x_weeks_events_carry_local_day_and_week_number() {
    let offset = FixedOffset::east_opt(10 * 3600).unwrap_or_else(|| unreachable!());
    let harness = harness(offset);
    let board_id = BoardId::new();
    harness
        .rules
        .insert(scheduled_rule(
            board_id,
            TriggerPayload::WhenScheduledXWeeks {
                weeks: 2,
                day: WeekDay::Wed,
                anchor_week: Some(0),
            },
        ))
        .await;
    let late_tuesday_utc = Utc
        .with_ymd_and_hms(2026, 3, 3, 20, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!());

    let summary = harness
        .service
        .run_daily_fan_out(late_tuesday_utc)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(summary.date.to_string(), "2026-03-04");
    let envelopes = harness.transport.envelopes().await;
    assert_eq!(envelopes[0].id, format!("scheduled:x-weeks:{board_id}:2026-03-04"));
    assert!(matches!(
        envelopes[0].event,
        DomainEvent::ScheduledXWeeks {
            day: WeekDay::Wed,
            week_number,
            ..
        } if week_number == late_tuesday_utc.timestamp_millis().div_euclid(604_800_000)
    ));
}

#[tokio::test]
async fn no_scheduled_rules_is_a_no_op() {
    let harness = harness(utc());

    let summary = harness
        .service
        .run_daily_fan_out(tuesday())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(summary.skipped);
    assert_eq!(summary.events_dispatched, 0);
    assert!(harness.transport.batches().await.is_empty());
    assert_eq!(harness.journal.step_count().await, 0);
}

#[tokio::test]
async fn rerun_for_same_date_does_not_dispatch_again() {
    let harness = harness(utc());
    harness
        .rules
        .insert(scheduled_rule(
            BoardId::new(),
            TriggerPayload::WhenScheduledWeekly { day: WeekDay::Tue },
        ))
        .await;

    let first = harness
        .service
        .run_daily_fan_out(tuesday())
        .await
        .unwrap_or_else(|_| unreachable!());
    let second = harness
        .service
        .run_daily_fan_out(tuesday())
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(first, second);
    assert_eq!(harness.transport.batches().await.len(), 1);
}
