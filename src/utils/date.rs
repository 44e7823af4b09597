use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Weekday};

const EN_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn machine_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn weekday_name(date: &NaiveDate) -> &'static str {
    let idx = match date.weekday() {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    };
    EN_WEEKDAYS[idx]
}

pub fn month_name(date: &NaiveDate) -> &'static str {
    EN_MONTHS[date.month0() as usize]
}

/// `Friday, 5 February 2016`
pub fn human_date(date: &NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date),
        date.day(),
        month_name(date),
        date.year()
    )
}

/// Inclusive bounds of a period expression.
///
/// Supported: `YYYY-MM-DD`, `YYYY-MM`, `YYYY`, and `start:end` ranges of
/// any of those.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((start, end)) = p.split_once(':') {
        let (from, _) = single_period(start)?;
        let (_, to) = single_period(end)?;
        if from > to {
            return Err(AppError::InvalidPeriod(p.to_string()));
        }
        return Ok((from, to));
    }

    single_period(p)
}

fn single_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();
    let invalid = || AppError::InvalidPeriod(p.to_string());

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = last_day_of_month(first.year(), first.month()).ok_or_else(invalid)?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
        return Ok((first, last));
    }

    Err(invalid())
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (y, m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
