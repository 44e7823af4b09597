//! Time utilities: ISO-8601 timestamps, duration parsing and formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::sync::LazyLock;

static COLON_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):([0-5]\d)(?::([0-5]\d))?$").expect("valid duration regex")
});

static UNIT_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?\s*(?:(\d+)\s*s)?$")
        .expect("valid duration regex")
});

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Format a timestamp the way it crosses the storage boundary
/// (`2016-02-05T10:00:00.000Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a user supplied duration into signed seconds.
///
/// Accepted forms: `H:MM`, `H:MM:SS`, `1h30m`, `90m`, `45s`, `2h` and a bare
/// number of minutes. A leading `-` negates the value.
pub fn parse_duration(input: &str) -> AppResult<i64> {
    let trimmed = input.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest.trim_start()),
        None => (1, trimmed),
    };

    if body.is_empty() {
        return Err(AppError::InvalidDuration(input.to_string()));
    }

    let invalid = || AppError::InvalidDuration(input.to_string());
    let number = |s: &str| s.parse::<i64>().map_err(|_| invalid());
    // `value * unit`, rejecting totals that do not fit in an i64
    let scaled = |value: i64, unit: i64| value.checked_mul(unit).ok_or_else(invalid);

    let total = if body.bytes().all(|b| b.is_ascii_digit()) {
        scaled(number(body)?, 60)?
    } else if let Some(caps) = COLON_FORM.captures(body) {
        let mut total = scaled(number(&caps[1])?, 3600)?;
        total = total
            .checked_add(number(&caps[2])? * 60)
            .ok_or_else(invalid)?;
        if let Some(m) = caps.get(3) {
            total = total.checked_add(number(m.as_str())?).ok_or_else(invalid)?;
        }
        total
    } else if let Some(caps) = UNIT_FORM.captures(body) {
        let mut total: i64 = 0;
        for (idx, unit) in [(1, 3600), (2, 60), (3, 1)] {
            if let Some(m) = caps.get(idx) {
                total = total
                    .checked_add(scaled(number(m.as_str())?, unit)?)
                    .ok_or_else(invalid)?;
            }
        }
        total
    } else {
        return Err(invalid());
    };

    Ok(sign * total)
}

/// Render signed seconds as `H:MM` (or `H:MM:SS`), keeping the sign.
pub fn format_duration(seconds: i64, show_seconds: bool) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.unsigned_abs();
    let hours = s / 3600;
    let minutes = (s % 3600) / 60;

    if show_seconds {
        format!("{}{}:{:02}:{:02}", sign, hours, minutes, s % 60)
    } else {
        format!("{}{}:{:02}", sign, hours, minutes)
    }
}

/// Machine readable ISO-8601 duration (`PT1H5M30S`).
pub fn iso_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.unsigned_abs();
    format!("{}PT{}H{}M{}S", sign, s / 3600, (s % 3600) / 60, s % 60)
}
