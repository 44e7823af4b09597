use rtimeledger::core::calendar::{CalendarIndex, date_label};
use rtimeledger::models::TimerKey;
use rtimeledger::utils::date::human_date;

mod common;
use common::{T0, date, loaded_tracker, memory_tracker, record};

#[test]
fn test_date_labels() {
    // Friday
    let today = date("2016-02-05");

    assert_eq!(date_label(today, today), "Today");
    assert_eq!(date_label(today, date("2016-02-04")), "Yesterday");
    assert_eq!(date_label(today, date("2016-02-03")), "Wednesday");
    assert_eq!(date_label(today, date("2016-01-30")), "Saturday");
    // a week ago is past the weekday names
    assert_eq!(date_label(today, date("2016-01-29")), "Friday, 29 January 2016");
    assert_eq!(date_label(today, date("2016-02-06")), "Saturday, 6 February 2016");
    assert_eq!(human_date(&today), "Friday, 5 February 2016");
}

#[test]
fn test_new_timer_lands_in_todays_bucket() {
    let (_clock, mut tracker) = memory_tracker(T0);
    let key = tracker.start_new(None).unwrap();

    assert_eq!(tracker.calendar().dates().collect::<Vec<_>>(), vec![date("2016-02-05")]);
    assert_eq!(tracker.calendar().timers_on(date("2016-02-05")), &[key]);
}

#[test]
fn test_buckets_are_most_recent_first_and_membership_is_kept() {
    let (clock, mut tracker) = loaded_tracker(
        T0,
        vec![record("2016-02-01T08:00:00Z", None, &[("2016-02-01T09:00:00Z", 60)])],
    );
    let key = tracker.key_of(1).unwrap();

    tracker.toggle(key).unwrap();
    clock.advance_secs(60);
    tracker.toggle(key).unwrap();

    let dates: Vec<_> = tracker.calendar().dates().collect();
    assert_eq!(dates, vec![date("2016-02-05"), date("2016-02-01")]);
    assert!(tracker.calendar().contains(date("2016-02-01"), key));
    assert!(tracker.calendar().contains(date("2016-02-05"), key));
}

#[test]
fn test_bucket_orders_timers_by_recency() {
    let (clock, mut tracker) = memory_tracker(T0);
    let first = tracker.start_new(None).unwrap();
    clock.advance_secs(60);
    let second = tracker.start_new(None).unwrap();

    let today = date("2016-02-05");
    assert_eq!(tracker.calendar().timers_on(today), &[second, first]);

    // a correction is newer activity than the second timer's start
    clock.advance_secs(60);
    tracker.enter(first, 600, None).unwrap();
    assert_eq!(tracker.calendar().timers_on(today), &[first, second]);
}

#[test]
fn test_recency_ties_keep_insertion_order() {
    let mut index = CalendarIndex::new();
    let (_clock, tracker) = loaded_tracker(
        T0,
        vec![
            record("2016-02-05T08:00:00Z", None, &[]),
            record("2016-02-05T08:00:00Z", None, &[]),
        ],
    );
    let a = tracker.key_of(1).unwrap();
    let b = tracker.key_of(2).unwrap();
    let same = |_: TimerKey| tracker.timer(a).unwrap().last_activity();

    assert!(index.touch(date("2016-02-05"), a, same));
    assert!(index.touch(date("2016-02-05"), b, same));
    assert!(!index.touch(date("2016-02-05"), a, same));
    assert_eq!(index.timers_on(date("2016-02-05")), &[a, b]);
}

#[test]
fn test_remove_drops_empty_buckets() {
    let mut index = CalendarIndex::new();
    let (_clock, tracker) = loaded_tracker(
        T0,
        vec![
            record("2016-02-04T08:00:00Z", None, &[]),
            record("2016-02-05T08:00:00Z", None, &[]),
        ],
    );
    let a = tracker.key_of(1).unwrap();
    let b = tracker.key_of(2).unwrap();
    let recency = |k: TimerKey| tracker.timer(k).unwrap().last_activity();

    index.touch(date("2016-02-04"), a, recency);
    index.touch(date("2016-02-05"), a, recency);
    index.touch(date("2016-02-05"), b, recency);

    index.remove(a);

    assert_eq!(index.len(), 1);
    assert_eq!(index.timers_on(date("2016-02-05")), &[b]);
    assert!(index.timers_on(date("2016-02-04")).is_empty());
}

#[test]
fn test_roll_over_adds_running_timer_to_new_day() {
    let (clock, mut tracker) = memory_tracker("2016-02-05T23:59:00Z");
    let key = tracker.start_new(None).unwrap();

    assert!(!tracker.roll_over());

    clock.advance_secs(120);
    assert!(tracker.roll_over());
    assert!(!tracker.roll_over());

    assert!(tracker.calendar().contains(date("2016-02-06"), key));
    assert!(tracker.calendar().contains(date("2016-02-05"), key));
    assert_eq!(tracker.logged_on_date(key, date("2016-02-06")).unwrap(), 120);
}

#[test]
fn test_days_summaries() {
    let (clock, mut tracker) = loaded_tracker(
        T0,
        vec![
            record("2016-02-04T08:00:00Z", None, &[("2016-02-04T09:00:00Z", 600)]),
            record("2016-02-05T08:00:00Z", None, &[("2016-02-05T09:00:00Z", 300)]),
        ],
    );
    let running = tracker.key_of(1).unwrap();
    tracker.toggle(running).unwrap();
    clock.advance_secs(100);

    let days = tracker.days(None);
    assert_eq!(days.len(), 2);

    assert_eq!(days[0].label, "Today");
    assert_eq!(days[0].total, 400);
    assert_eq!(days[0].timers.len(), 2);
    assert_eq!(days[0].timers[0].key, running);
    assert!(days[0].timers[0].running);
    assert_eq!(days[0].timers[0].logged, 100);
    assert_eq!(tracker.total_on_date(date("2016-02-05")), 400);

    assert_eq!(days[1].label, "Yesterday");
    assert_eq!(days[1].total, 600);
    assert_eq!(days[1].timers[0].entries.len(), 1);

    let only_yesterday = tracker.days(Some((date("2016-02-04"), date("2016-02-04"))));
    assert_eq!(only_yesterday.len(), 1);
    assert_eq!(only_yesterday[0].date, date("2016-02-04"));
}
