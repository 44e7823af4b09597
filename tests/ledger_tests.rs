use chrono::{Duration, TimeZone, Utc};
use rtimeledger::core::clock::Clock;
use rtimeledger::core::ledger::{active_dates, elapsed_seconds, logged_on_date, logged_total};
use rtimeledger::models::Timer;

mod common;
use common::{T0, clock_at, date, loaded_tracker, memory_tracker, record};

#[test]
fn test_elapsed_seconds_rounds_up() {
    let since = Utc.with_ymd_and_hms(2016, 2, 5, 10, 0, 0).unwrap();

    assert_eq!(elapsed_seconds(since, since), 0);
    assert_eq!(elapsed_seconds(since, since + Duration::milliseconds(1)), 1);
    assert_eq!(elapsed_seconds(since, since + Duration::milliseconds(1000)), 1);
    assert_eq!(elapsed_seconds(since, since + Duration::milliseconds(1001)), 2);
    assert_eq!(elapsed_seconds(since, since + Duration::seconds(330)), 330);
}

#[test]
fn test_logged_on_date_sums_entries_of_that_day() {
    let (_clock, tracker) = loaded_tracker(
        T0,
        vec![record(
            "2016-02-03T08:00:00Z",
            None,
            &[
                ("2016-02-03T09:00:00Z", 600),
                ("2016-02-05T09:00:00Z", 300),
                ("2016-02-05T09:30:00Z", -100),
            ],
        )],
    );
    let key = tracker.key_of(1).unwrap();

    assert_eq!(tracker.logged_on_date(key, date("2016-02-03")).unwrap(), 600);
    assert_eq!(tracker.logged_on_date(key, date("2016-02-05")).unwrap(), 200);
    assert_eq!(tracker.logged_on_date(key, date("2016-02-04")).unwrap(), 0);
    assert_eq!(tracker.logged_total(key).unwrap(), 800);
}

#[test]
fn test_logged_on_date_can_be_negative() {
    let (_clock, tracker) = loaded_tracker(
        T0,
        vec![record("2016-02-05T08:00:00Z", None, &[("2016-02-05T09:00:00Z", -45)])],
    );
    let key = tracker.key_of(1).unwrap();

    assert_eq!(tracker.logged_on_date(key, date("2016-02-05")).unwrap(), -45);
}

#[test]
fn test_running_interval_counts_toward_today() {
    let (clock, mut tracker) = memory_tracker(T0);

    let key = tracker.start_new(None).unwrap();
    clock.advance(Duration::milliseconds(61_500));

    // 61.5s rounds up
    assert_eq!(tracker.logged_on_date(key, date("2016-02-05")).unwrap(), 62);
    assert_eq!(tracker.logged_total(key).unwrap(), 62);
}

#[test]
fn test_running_total_is_non_decreasing_and_idempotent() {
    let (clock, mut tracker) = memory_tracker(T0);
    let key = tracker.start_new(None).unwrap();
    let today = date("2016-02-05");

    let mut previous = 0;
    for _ in 0..5 {
        clock.advance_secs(7);
        let first = tracker.logged_on_date(key, today).unwrap();
        let second = tracker.logged_on_date(key, today).unwrap();
        assert_eq!(first, second);
        assert!(first >= previous);
        previous = first;
    }
    assert_eq!(previous, 35);
}

#[test]
fn test_timer_running_since_yesterday_counts_only_today() {
    let (clock, mut tracker) = memory_tracker("2016-02-05T23:00:00Z");
    let key = tracker.start_new(None).unwrap();

    clock.set_iso("2016-02-06T01:00:00Z").unwrap();

    assert_eq!(tracker.logged_on_date(key, date("2016-02-05")).unwrap(), 0);
    assert_eq!(tracker.logged_on_date(key, date("2016-02-06")).unwrap(), 7200);
}

#[test]
fn test_active_dates_are_unique_and_most_recent_first() {
    let clock = clock_at(T0);
    let record = record(
        "2016-02-01T08:00:00Z",
        Some("2016-02-05T09:00:00Z"),
        &[
            ("2016-02-02T09:00:00Z", 60),
            ("2016-02-04T09:00:00Z", 60),
            ("2016-02-04T11:00:00Z", 60),
        ],
    );
    let timer = Timer::from_record(&record).unwrap();

    assert_eq!(
        active_dates(&timer, &clock),
        vec![date("2016-02-05"), date("2016-02-04"), date("2016-02-02")]
    );
    assert_eq!(logged_total(&timer, &clock), 180 + 3600);
    assert_eq!(logged_on_date(&timer, clock.today(), &clock), 3600);
}
