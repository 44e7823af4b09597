use rtimeledger::errors::AppError;
use rtimeledger::utils::date::period_bounds;
use rtimeledger::utils::formatting::{truncate, untitled_label};
use rtimeledger::utils::table::{Column, Table};
use rtimeledger::utils::time::{format_duration, iso_duration, parse_duration};

mod common;
use common::date;

#[test]
fn test_parse_duration_forms() {
    assert_eq!(parse_duration("1:30").unwrap(), 5400);
    assert_eq!(parse_duration("1:30:15").unwrap(), 5415);
    assert_eq!(parse_duration("0:05").unwrap(), 300);
    assert_eq!(parse_duration("90m").unwrap(), 5400);
    assert_eq!(parse_duration("1h30m").unwrap(), 5400);
    assert_eq!(parse_duration("1h 30m").unwrap(), 5400);
    assert_eq!(parse_duration("45s").unwrap(), 45);
    assert_eq!(parse_duration("2h").unwrap(), 7200);
    // bare numbers are minutes
    assert_eq!(parse_duration("30").unwrap(), 1800);
    assert_eq!(parse_duration("0").unwrap(), 0);
    assert_eq!(parse_duration("-0:30").unwrap(), -1800);
    assert_eq!(parse_duration(" 15m ").unwrap(), 900);
}

#[test]
fn test_parse_duration_rejects_garbage() {
    for input in ["", "-", "abc", "1:75", "1:5", "h", "1.5h", "10 minutes"] {
        assert!(
            matches!(parse_duration(input), Err(AppError::InvalidDuration(_))),
            "{input:?} should be rejected"
        );
    }
}

#[test]
fn test_parse_duration_rejects_out_of_range_totals() {
    for input in [
        "999999999999999999",
        "9999999999999999:00",
        "9999999999999999h",
        "-9999999999999999h",
        "2562047788015215h59m",
        "99999999999999999999s",
    ] {
        assert!(
            matches!(parse_duration(input), Err(AppError::InvalidDuration(_))),
            "{input} should be rejected"
        );
    }

    // largest whole-hour total that still fits
    assert_eq!(
        parse_duration("2562047788015215h").unwrap(),
        2_562_047_788_015_215 * 3600
    );
}

#[test]
fn test_format_duration_at_i64_limits() {
    assert_eq!(format_duration(i64::MIN, true), "-2562047788015215:30:08");
    assert_eq!(format_duration(i64::MAX, false), "2562047788015215:30");
    assert_eq!(iso_duration(i64::MIN), "-PT2562047788015215H30M8S");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(5415, false), "1:30");
    assert_eq!(format_duration(5415, true), "1:30:15");
    assert_eq!(format_duration(0, false), "0:00");
    assert_eq!(format_duration(-1800, false), "-0:30");
    assert_eq!(format_duration(-45, true), "-0:00:45");
    assert_eq!(iso_duration(3930), "PT1H5M30S");
    assert_eq!(iso_duration(-60), "-PT0H1M0S");
}

#[test]
fn test_period_bounds() {
    assert_eq!(
        period_bounds("2016-02-05").unwrap(),
        (date("2016-02-05"), date("2016-02-05"))
    );
    assert_eq!(
        period_bounds("2016-02").unwrap(),
        (date("2016-02-01"), date("2016-02-29"))
    );
    assert_eq!(
        period_bounds("2016").unwrap(),
        (date("2016-01-01"), date("2016-12-31"))
    );
    assert_eq!(
        period_bounds("2016-01:2016-02").unwrap(),
        (date("2016-01-01"), date("2016-02-29"))
    );
    assert!(matches!(
        period_bounds("2016-03:2016-02"),
        Err(AppError::InvalidPeriod(_))
    ));
    assert!(period_bounds("last week").is_err());
}

#[test]
fn test_truncate_and_table() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a rather long title", 8), "a rathe…");

    let mut table = Table::new(vec![Column::right("ID", 4), Column::left("TIMER", 6)]);
    table.add_row(vec!["#1".into(), "Write".into()]);
    let out = table.render();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "  ID TIMER  ");
    assert_eq!(lines[1], "  #1 Write  ");
}

#[test]
fn test_untitled_label() {
    use chrono::TimeZone;
    let at = chrono::Local.with_ymd_and_hms(2016, 2, 5, 9, 7, 0).unwrap();
    assert_eq!(untitled_label(&at), "New timer started at 9:07");
}
