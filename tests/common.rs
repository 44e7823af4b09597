#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rtimeledger::core::clock::ManualClock;
use rtimeledger::core::tracker::Tracker;
use rtimeledger::models::{EntryRecord, TimerRecord};
use rtimeledger::store::MemoryStore;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const T0: &str = "2016-02-05T10:00:00Z";

pub fn rti() -> Command {
    let mut cmd = cargo_bin_cmd!("rtimeledger");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimeledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a test DB through the CLI
pub fn init_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn clock_at(iso: &str) -> ManualClock {
    ManualClock::at(iso).expect("valid test timestamp")
}

/// Empty tracker over a memory store; the returned clock drives it.
pub fn memory_tracker(iso: &str) -> (ManualClock, Tracker<ManualClock, MemoryStore>) {
    let clock = clock_at(iso);
    let tracker = Tracker::new(clock.clone(), MemoryStore::new());
    (clock, tracker)
}

/// Tracker loaded from the given records.
pub fn loaded_tracker(
    iso: &str,
    records: Vec<TimerRecord>,
) -> (ManualClock, Tracker<ManualClock, MemoryStore>) {
    let clock = clock_at(iso);
    let tracker = Tracker::load(clock.clone(), MemoryStore::with_records(records))
        .expect("load tracker");
    (clock, tracker)
}

pub fn record(created_on: &str, started_on: Option<&str>, entries: &[(&str, i64)]) -> TimerRecord {
    TimerRecord {
        id: None,
        created_on: created_on.to_string(),
        started_on: started_on.map(str::to_string),
        description: None,
        entries: entries
            .iter()
            .map(|(at, value)| EntryRecord {
                id: None,
                logged_on: at.to_string(),
                manually: false,
                value: *value,
            })
            .collect(),
    }
}
