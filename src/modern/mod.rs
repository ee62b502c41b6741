//! Modern style: immutable chrono value types.
//!
//! Dates, date-times and times of day are separate types, so a "date" never
//! carries a hidden midnight or zone and a "time" never carries 1970-01-01.
//! Every operation returns a new value.
//!
//! # Examples
//!
//! ```
//! use dattempo::modern;
//!
//! let date = modern::local_date(1987, 5, 31).unwrap();
//! assert_eq!("1987-06-30", modern::add_months(date, 1).unwrap().to_string());
//!
//! let date = modern::parse_date("10 Jun 1987", "dd MMM yyyy").unwrap();
//! assert_eq!("10/06/1987", modern::format_date(date, "dd/MM/yyyy").unwrap());
//! ```

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use chrono_tz::Tz;

use crate::civil::{self, YearType};
use crate::error::{Error, Result};
use crate::pattern::Pattern;

pub mod adjust;
pub mod period;
pub mod zoned;

pub use adjust::{
    adjust_working_days, is_working_day, last_day_of_month, next_tuesday, next_weekday,
    working_days_ahead,
};
pub use period::Period;
pub use zoned::{to_time_zone, to_utc, zone, zoned_date_time};

/// Creates a date. `month` and `day` are 1-based.
///
/// Returns [`Error::InvalidArgument`] for dates that do not exist, such as
/// February 30.
pub fn local_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        Error::invalid(format!(
            "no such date {year:04}-{month:02}-{day:02}"
        ))
    })
}

/// Returns today's date in `zone`, read from the system clock.
pub fn today(zone: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&zone).date_naive()
}

/// Parses a date with a [`Pattern`] source such as `dd MMM yyyy`.
pub fn parse_date(text: &str, pattern: &str) -> Result<NaiveDate> {
    let pattern = Pattern::new(pattern)?;
    NaiveDate::parse_from_str(text, pattern.parse_format()?)
        .map_err(|e| pattern.parse_error(text, e))
}

/// Parses a date with a time of day, e.g. with `dd/MM/yyyy HH:mm:ss`.
pub fn parse_date_time(text: &str, pattern: &str) -> Result<NaiveDateTime> {
    let pattern = Pattern::new(pattern)?;
    NaiveDateTime::parse_from_str(text, pattern.parse_format()?)
        .map_err(|e| pattern.parse_error(text, e))
}

/// Parses a time of day with an already compiled pattern.
///
/// ```
/// use dattempo::{modern, pattern::Pattern};
///
/// let hh_mm = Pattern::new("HH:mm").unwrap();
/// let time = modern::parse_time("13:30", &hh_mm).unwrap();
/// assert_eq!("13:30:00", time.to_string());
/// ```
pub fn parse_time(text: &str, pattern: &Pattern) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text, pattern.parse_format()?)
        .map_err(|e| pattern.parse_error(text, e))
}

/// Formats a date with a [`Pattern`] source.
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    Pattern::new(pattern)?.format(&date)
}

/// Drops the time of day.
pub fn truncate_to_date(date_time: NaiveDateTime) -> NaiveDate {
    date_time.date()
}

/// Combines `date` with a time of day parsed from `time`.
pub fn set_time_to_date(date: NaiveDate, time: &str, pattern: &Pattern) -> Result<NaiveDateTime> {
    Ok(date.and_time(parse_time(time, pattern)?))
}

/// Number of days from `from` to `to`, negative if `to` is earlier.
pub fn days_diff(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn year_of(date: NaiveDate) -> i32 {
    date.year()
}

/// 1-based month number.
pub fn month_of(date: NaiveDate) -> u32 {
    date.month()
}

pub fn day_of(date: NaiveDate) -> u32 {
    date.day()
}

/// Adds (or with a negative count, subtracts) days.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| out_of_range(date, days, "days"))
}

/// Adds months, clamping the day to the end of a shorter target month.
pub fn add_months(date: NaiveDate, months: i32) -> Result<NaiveDate> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.ok_or_else(|| out_of_range(date, months.into(), "months"))
}

/// Adds years, clamping February 29 to February 28 in common years.
pub fn add_years(date: NaiveDate, years: i32) -> Result<NaiveDate> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| out_of_range(date, years.into(), "years"))?;
    add_months(date, months)
}

/// Adds minutes, wrapping around midnight.
pub fn add_minutes(time: NaiveTime, minutes: i32) -> NaiveTime {
    shift_time(time, TimeDelta::minutes(minutes.into()))
}

/// Adds seconds, wrapping around midnight.
pub fn add_seconds(time: NaiveTime, seconds: i32) -> NaiveTime {
    shift_time(time, TimeDelta::seconds(seconds.into()))
}

/// Shifts a time of day by a duration, wrapping around midnight.
pub fn shift_time(time: NaiveTime, delta: TimeDelta) -> NaiveTime {
    time.overflowing_add_signed(delta).0
}

pub fn is_leap_year(date: NaiveDate) -> bool {
    YearType::from_gregorian(date.year().into()).is_leap()
}

/// Number of days in the month of `date`.
pub fn length_of_month(date: NaiveDate) -> u32 {
    civil::days_in_month(date.year().into(), date.month())
}

fn out_of_range(date: NaiveDate, amount: i64, unit: &str) -> Error {
    Error::invalid(format!("{date} plus {amount} {unit} is out of range"))
}
