use rtimeledger::core::clock::Clock;
use rtimeledger::core::notify::Notification;
use rtimeledger::core::state::{TimerState, Transition, state_of};
use rtimeledger::errors::AppError;
use rtimeledger::store::TimerStore;
use std::cell::RefCell;
use std::rc::Rc;

mod common;
use common::{T0, date, loaded_tracker, memory_tracker, record};

#[test]
fn test_toggle_after_330_seconds_logs_one_entry() {
    let (clock, mut tracker) = memory_tracker(T0);

    let key = tracker.start_new(None).unwrap();
    assert!(tracker.timer(key).unwrap().is_running());

    clock.set_iso("2016-02-05T10:05:30Z").unwrap();
    let transition = tracker.toggle(key).unwrap();

    assert_eq!(
        transition,
        Transition::Paused {
            elapsed: 330,
            logged_on: clock.now()
        }
    );

    let timer = tracker.timer(key).unwrap();
    assert!(!timer.is_running());
    assert_eq!(timer.entries().len(), 1);
    assert_eq!(timer.entries()[0].value, 330);
    assert!(!timer.entries()[0].manually);
    assert_eq!(tracker.logged_on_date(key, date("2016-02-05")).unwrap(), 330);
}

#[test]
fn test_start_new_pauses_the_running_timer() {
    let (clock, mut tracker) = memory_tracker(T0);

    let first = tracker.start_new(Some("Write report".into())).unwrap();
    clock.advance_secs(90);
    let second = tracker.start_new(None).unwrap();

    assert_eq!(tracker.running(), Some(second));
    let t1 = tracker.timer(first).unwrap();
    assert!(!t1.is_running());
    assert_eq!(t1.entries().len(), 1);
    assert_eq!(t1.entries()[0].value, 90);
    assert_eq!(t1.title(), Some("Write report"));

    let running = tracker.iter().filter(|(_, t)| t.is_running()).count();
    assert_eq!(running, 1);
}

#[test]
fn test_at_most_one_timer_runs_after_any_toggles() {
    let (clock, mut tracker) = memory_tracker(T0);
    let keys: Vec<_> = (0..3).map(|_| tracker.start_new(None).unwrap()).collect();

    for step in 0..12 {
        clock.advance_secs(13);
        tracker.toggle(keys[step % 3]).unwrap();
        let running = tracker.iter().filter(|(_, t)| t.is_running()).count();
        assert!(running <= 1, "step {step}: {running} timers running");
    }
}

#[test]
fn test_set_running_on_running_timer_changes_nothing() {
    let (clock, mut tracker) = memory_tracker(T0);
    let key = tracker.start_new(None).unwrap();
    let started = tracker.timer(key).unwrap().started_on();

    clock.advance_secs(30);
    tracker.set_running(key).unwrap();

    let timer = tracker.timer(key).unwrap();
    assert_eq!(timer.started_on(), started);
    assert!(timer.entries().is_empty());
    assert_eq!(state_of(timer), TimerState::Running { since: started.unwrap() });
}

#[test]
fn test_pause_running_without_running_timer() {
    let (_clock, mut tracker) = memory_tracker(T0);
    assert!(tracker.pause_running().unwrap().is_none());

    let key = tracker.start_new(None).unwrap();
    let (paused, transition) = tracker.pause_running().unwrap().unwrap();
    assert_eq!(paused, key);
    assert!(matches!(transition, Transition::Paused { elapsed: 0, .. }));
    assert!(tracker.running().is_none());
}

#[test]
fn test_describe_sets_and_clears() {
    let (_clock, mut tracker) = memory_tracker(T0);
    let key = tracker.start_new(None).unwrap();

    tracker.describe(key, "  Code review ").unwrap();
    assert_eq!(tracker.timer(key).unwrap().description.as_deref(), Some("Code review"));

    tracker.describe(key, "   ").unwrap();
    assert_eq!(tracker.timer(key).unwrap().description, None);

    let id = tracker.timer(key).unwrap().id.unwrap();
    assert_eq!(tracker.store().get(id).unwrap().description, None);
}

#[test]
fn test_unknown_id_is_timer_not_found() {
    let (_clock, tracker) = memory_tracker(T0);
    assert!(matches!(tracker.resolve(42), Err(AppError::TimerNotFound(_))));
}

#[test]
fn test_notifications_in_order() {
    let (clock, mut tracker) = memory_tracker(T0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = tracker.subscribe(move |n: &Notification| sink.borrow_mut().push(n.name()));

    let first = tracker.start_new(None).unwrap();
    clock.advance_secs(10);
    tracker.start_new(None).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            "timer-added",
            "timer-started",
            "timer-added",
            "entry-added",
            "timer-paused",
            "timer-started",
        ]
    );

    assert!(tracker.unsubscribe(subscription));
    assert!(!tracker.unsubscribe(subscription));
    tracker.toggle(first).unwrap();
    assert_eq!(seen.borrow().len(), 6);
}

#[test]
fn test_entry_notification_carries_date_and_value() {
    let (clock, mut tracker) = memory_tracker(T0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    tracker.subscribe(move |n: &Notification| {
        if let Notification::EntryAdded { .. } = n {
            sink.borrow_mut().push(n.clone());
        }
    });

    let key = tracker.start_new(None).unwrap();
    clock.advance_secs(45);
    tracker.toggle(key).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![Notification::EntryAdded {
            timer: key,
            date: date("2016-02-05"),
            value: 45,
            manually: false,
        }]
    );
}

#[test]
fn test_changes_are_saved_through_the_store() {
    let (clock, mut tracker) = memory_tracker(T0);
    let key = tracker.start_new(None).unwrap();
    clock.advance_secs(60);
    tracker.toggle(key).unwrap();

    let id = tracker.timer(key).unwrap().id.unwrap();
    let stored = tracker.store().get(id).unwrap();
    assert_eq!(stored.started_on, None);
    assert_eq!(stored.entries.len(), 1);
    assert_eq!(stored.entries[0].value, 60);
    assert!(tracker.timer(key).unwrap().entries()[0].id.is_some());
}

#[test]
fn test_failed_save_keeps_memory_state_and_retries() {
    let (clock, mut tracker) = memory_tracker(T0);
    tracker.store_mut().fail_next(1);

    let err = tracker.start_new(None).unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));

    // applied in memory all the same
    assert_eq!(tracker.len(), 1);
    let key = tracker.running().unwrap();
    assert_eq!(tracker.timer(key).unwrap().id, None);
    assert!(tracker.store().records().is_empty());

    clock.advance_secs(20);
    tracker.toggle(key).unwrap();

    let timer = tracker.timer(key).unwrap();
    assert!(timer.id.is_some());
    let stored = tracker.store().records();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].entries.len(), 1);
    assert_eq!(stored[0].entries[0].value, 20);
}

#[test]
fn test_unsaved_entry_is_saved_with_the_next_change() {
    let (clock, mut tracker) = memory_tracker(T0);
    let key = tracker.start_new(None).unwrap();
    clock.advance_secs(5);

    let writes = tracker.store().writes();
    tracker.toggle(key).unwrap();
    // timer row plus the new entry
    assert_eq!(tracker.store().writes(), writes + 2);

    tracker.toggle(key).unwrap();
    clock.advance_secs(5);
    tracker.store_mut().fail_next(1);
    assert!(tracker.toggle(key).is_err());

    let id = tracker.timer(key).unwrap().id.unwrap();
    assert_eq!(tracker.timer(key).unwrap().entries().len(), 2);
    assert_eq!(tracker.store().get(id).unwrap().entries.len(), 1);

    tracker.describe(key, "retry").unwrap();
    assert_eq!(tracker.store().get(id).unwrap().entries.len(), 2);
    assert!(tracker.timer(key).unwrap().entries().iter().all(|e| e.id.is_some()));
}

#[test]
fn test_load_keeps_only_latest_running_timer() {
    let (clock, tracker) = loaded_tracker(
        T0,
        vec![
            record("2016-02-05T08:00:00Z", Some("2016-02-05T08:00:00Z"), &[]),
            record("2016-02-05T09:00:00Z", Some("2016-02-05T09:00:00Z"), &[]),
        ],
    );

    let older = tracker.key_of(1).unwrap();
    let newer = tracker.key_of(2).unwrap();
    assert_eq!(tracker.running(), Some(newer));

    let paused = tracker.timer(older).unwrap();
    assert!(!paused.is_running());
    assert_eq!(paused.entries()[0].value, 7200);
    assert_eq!(paused.entries()[0].logged_on, clock.now());

    assert_eq!(tracker.store().get(1).unwrap().started_on, None);
}

#[test]
fn test_load_preserves_records() {
    let mut source = record(
        "2016-02-04T08:00:00Z",
        None,
        &[("2016-02-04T09:00:00Z", 600), ("2016-02-05T09:00:00Z", 120)],
    );
    source.description = Some("Support".into());

    let (_clock, tracker) = loaded_tracker(T0, vec![source]);
    let key = tracker.key_of(1).unwrap();
    let timer = tracker.timer(key).unwrap();

    assert_eq!(timer.description.as_deref(), Some("Support"));
    assert_eq!(timer.entries().len(), 2);
    // most recent first
    assert_eq!(timer.entries()[0].value, 120);
    assert_eq!(timer.entries()[1].value, 600);

    let mut store = tracker.store().clone();
    let stored = store.load().unwrap();
    assert_eq!(stored[0].entries.len(), 2);
}

#[test]
fn test_import_adds_new_timers() {
    let (_clock, mut tracker) = memory_tracker(T0);
    tracker.start_new(Some("existing".into())).unwrap();

    let mut incoming = record("2016-01-10T08:00:00Z", None, &[("2016-01-10T09:00:00Z", 900)]);
    incoming.id = Some(1);
    let keys = tracker.import(&[incoming]).unwrap();

    assert_eq!(keys.len(), 1);
    assert_eq!(tracker.len(), 2);
    let imported = tracker.timer(keys[0]).unwrap();
    // ids are never reused from the file
    assert_eq!(imported.id, Some(2));
    assert_eq!(tracker.logged_on_date(keys[0], date("2016-01-10")).unwrap(), 900);
    assert_eq!(tracker.calendar().timers_on(date("2016-01-10")), &[keys[0]]);
}

#[test]
fn test_import_with_bad_timestamp_imports_nothing() {
    let (_clock, mut tracker) = memory_tracker(T0);
    let good = record("2016-01-10T08:00:00Z", None, &[]);
    let bad = record("yesterday", None, &[]);

    let err = tracker.import(&[good, bad]).unwrap_err();
    assert!(matches!(err, AppError::InvalidTimestamp(_)));
    assert!(tracker.is_empty());
}
