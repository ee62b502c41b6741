//! Date adjusters: working days, month end, next weekday.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::civil;
use crate::error::{Error, Result};

/// `true` unless `date` falls on a Saturday or Sunday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advances `date` by `count` working days, skipping Saturdays and Sundays.
///
/// A start on a weekend counts from the Friday before it, so one working day
/// after a Saturday or Sunday is the following Monday.
///
/// Returns [`Error::InvalidArgument`] if `count` is not positive or the
/// result is out of range.
///
/// # Example
///
/// ```
/// use dattempo::modern;
///
/// let sunday = modern::local_date(2014, 8, 10).unwrap();
/// let date = modern::adjust_working_days(sunday, 10).unwrap();
/// assert_eq!("2014-08-22", date.to_string());
/// ```
pub fn adjust_working_days(date: NaiveDate, count: i32) -> Result<NaiveDate> {
    let count = positive(count)?;
    shift_working_days(date, count)
        .ok_or_else(|| Error::invalid(format!("{date} plus {count} working days is out of range")))
}

/// Returns the rule "`count` working days ahead" as a closure, for mapping over
/// many dates.
///
/// The count is validated here, once. The rule itself saturates at the last
/// representable date instead of failing.
///
/// ```
/// use dattempo::modern;
///
/// let ahead = modern::working_days_ahead(1).unwrap();
/// let friday = modern::local_date(2014, 8, 8).unwrap();
/// assert_eq!("2014-08-11", ahead(friday).to_string());
///
/// assert!(modern::working_days_ahead(0).is_err());
/// ```
pub fn working_days_ahead(count: i32) -> Result<impl Fn(NaiveDate) -> NaiveDate + Copy> {
    let count = positive(count)?;
    Ok(move |date: NaiveDate| shift_working_days(date, count).unwrap_or(NaiveDate::MAX))
}

fn positive(count: i32) -> Result<u32> {
    match u32::try_from(count) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(Error::invalid(format!(
            "working days must be positive, got {count}"
        ))),
    }
}

/// Weeks are counted in blocks of five working days from the Monday of the
/// start week; a weekend start is moved back to its Friday first.
fn shift_working_days(date: NaiveDate, count: u32) -> Option<NaiveDate> {
    let weekday = i64::from(date.weekday().num_days_from_monday());
    let (start, weekday) = if weekday >= 5 {
        (date.checked_sub_days(chrono::Days::new((weekday - 4) as u64))?, 4)
    } else {
        (date, weekday)
    };
    let total = weekday + i64::from(count);
    let shift = total / 5 * 7 + total % 5 - weekday;
    tracing::trace!(%date, count, shift, "working days");
    start.checked_add_days(chrono::Days::new(shift as u64))
}

/// Moves `date` to the last day of its month.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let last = civil::days_in_month(date.year().into(), date.month());
    date.with_day(last).unwrap_or(date)
}

/// The first `weekday` strictly after `date`.
///
/// ```
/// use chrono::Weekday;
/// use dattempo::modern;
///
/// let tuesday = modern::local_date(2014, 6, 24).unwrap();
/// let next = modern::next_weekday(tuesday, Weekday::Tue).unwrap();
/// assert_eq!("2014-07-01", next.to_string());
/// ```
pub fn next_weekday(date: NaiveDate, weekday: Weekday) -> Result<NaiveDate> {
    let ahead = (weekday.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    date.checked_add_days(chrono::Days::new(ahead.into()))
        .ok_or_else(|| Error::invalid(format!("no {weekday} after {date}")))
}

/// The first Tuesday strictly after `date`.
pub fn next_tuesday(date: NaiveDate) -> Result<NaiveDate> {
    next_weekday(date, Weekday::Tue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn working_days_from_sunday() {
        assert_eq!(ymd(2014, 8, 22), adjust_working_days(ymd(2014, 8, 10), 10).unwrap());
    }

    #[test]
    fn working_days_table() {
        // 2014-08-04 is a Monday.
        let data = [
            ((2014, 8, 4), 1, (2014, 8, 5)),
            ((2014, 8, 4), 4, (2014, 8, 8)),
            ((2014, 8, 4), 5, (2014, 8, 11)),
            ((2014, 8, 4), 10, (2014, 8, 18)),
            ((2014, 8, 6), 3, (2014, 8, 11)),
            ((2014, 8, 6), 7, (2014, 8, 15)),
            ((2014, 8, 7), 1, (2014, 8, 8)),
            ((2014, 8, 7), 6, (2014, 8, 15)),
            ((2014, 8, 8), 1, (2014, 8, 11)),
            ((2014, 8, 8), 5, (2014, 8, 15)),
            ((2014, 8, 8), 6, (2014, 8, 18)),
            ((2014, 8, 9), 1, (2014, 8, 11)),
            ((2014, 8, 9), 5, (2014, 8, 15)),
            ((2014, 8, 10), 1, (2014, 8, 11)),
            ((2014, 8, 10), 5, (2014, 8, 15)),
            ((2014, 12, 31), 2, (2015, 1, 2)),
            ((2014, 12, 31), 3, (2015, 1, 5)),
        ];
        for ((y, m, d), count, (ey, em, ed)) in data {
            assert_eq!(
                ymd(ey, em, ed),
                adjust_working_days(ymd(y, m, d), count).unwrap(),
                "{y:04}-{m:02}-{d:02} + {count}"
            );
        }
    }

    #[test]
    fn working_days_match_day_by_day_walk() {
        let start = ymd(2014, 8, 1);
        for offset in 0..14 {
            let date = start + chrono::Days::new(offset);
            for count in 1..=25 {
                let mut walk = date;
                let mut left = count;
                while left > 0 {
                    walk = walk.succ_opt().unwrap();
                    if is_working_day(walk) {
                        left -= 1;
                    }
                }
                assert_eq!(walk, adjust_working_days(date, count).unwrap(), "{date} + {count}");
            }
        }
    }

    #[test]
    fn working_days_non_positive() {
        for count in [0, -1, i32::MIN] {
            assert!(
                matches!(adjust_working_days(ymd(2014, 8, 10), count), Err(Error::InvalidArgument(_))),
                "{count}"
            );
            assert!(working_days_ahead(count).is_err(), "{count}");
        }
    }

    #[test]
    fn working_days_rule() {
        let ahead = working_days_ahead(10).unwrap();
        assert_eq!(ymd(2014, 8, 22), ahead(ymd(2014, 8, 10)));
        assert_eq!(NaiveDate::MAX, ahead(NaiveDate::MAX));
        assert!(adjust_working_days(NaiveDate::MAX, 1).is_err());
    }

    #[test]
    fn weekends() {
        assert!(!is_working_day(ymd(2014, 6, 8)));
        assert!(!is_working_day(ymd(2014, 6, 7)));
        assert!(is_working_day(ymd(2014, 6, 9)));
        assert!(is_working_day(ymd(2014, 6, 13)));
    }

    #[test]
    fn month_end() {
        assert_eq!(ymd(2014, 2, 28), last_day_of_month(ymd(2014, 2, 10)));
        assert_eq!(ymd(2012, 2, 29), last_day_of_month(ymd(2012, 2, 10)));
        assert_eq!(ymd(2014, 12, 31), last_day_of_month(ymd(2014, 12, 31)));
    }

    #[test]
    fn next_days_of_week() {
        assert_eq!(ymd(2014, 7, 1), next_tuesday(ymd(2014, 6, 24)).unwrap());
        assert_eq!(ymd(2014, 12, 30), next_tuesday(ymd(2014, 12, 29)).unwrap());
        assert_eq!(ymd(2014, 6, 29), next_weekday(ymd(2014, 6, 24), Weekday::Sun).unwrap());
        assert!(next_tuesday(NaiveDate::MAX).is_err());
    }
}
