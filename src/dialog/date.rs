//! Date slot resolution

use super::ResolvedDate;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use thiserror::Error;

/// Hours of forecast requested from the begin date
pub const FORECAST_RANGE_HOURS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized date: {0}")]
pub struct DateParseError(pub String);

/// Resolve a raw date slot value against `today`.
///
/// Absent or blank input means today. Accepts ISO `YYYY-MM-DD`, the
/// keywords `today` / `tomorrow` and weekday names; anything else is a
/// [`DateParseError`].
pub fn resolve_date(raw: Option<&str>, today: NaiveDate) -> Result<ResolvedDate, DateParseError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty());
    let date = match raw {
        None => today,
        Some(value) => parse_date(value, today)?,
    };

    Ok(ResolvedDate {
        display_text: display_text(date, today),
        query_param: query_param(date),
    })
}

fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate, DateParseError> {
    match value.to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DateParseError(value.to_string())),
        _ => match value.parse::<Weekday>() {
            Ok(weekday) => next_weekday(weekday, today)
                .ok_or_else(|| DateParseError(value.to_string())),
            Err(_) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| DateParseError(value.to_string())),
        },
    }
}

/// Next day falling on `weekday`, counting today
fn next_weekday(weekday: Weekday, today: NaiveDate) -> Option<NaiveDate> {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today.checked_add_days(Days::new(u64::from(ahead)))
}

/// The date used when none was given
pub fn resolve_today(today: NaiveDate) -> ResolvedDate {
    ResolvedDate {
        display_text: display_text(today, today),
        query_param: query_param(today),
    }
}

/// `begin_date=YYYYMMDD&range=24`
pub fn query_param(date: NaiveDate) -> String {
    format!(
        "begin_date={}&range={FORECAST_RANGE_HOURS}",
        date.format("%Y%m%d")
    )
}

fn display_text(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.checked_add_days(Days::new(1)) == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format("%A %B %-d").to_string()
    }
}
