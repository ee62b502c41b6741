//! The same task done both ways.
//!
//! Every function takes modern inputs, runs the legacy version through a
//! [`Context`] and the modern version directly, and returns both answers.
//!
//! # Example
//!
//! ```
//! use dattempo::{compare, legacy::Context, modern};
//!
//! let ctx = Context::default();
//! let monday = modern::local_date(2014, 12, 29).unwrap();
//!
//! let next = compare::next_tuesday(&ctx, monday).unwrap();
//! assert!(!next.agree());
//! assert_eq!("2015-01-06", next.legacy.to_string());
//! assert_eq!("2014-12-30", next.modern.to_string());
//! ```

use chrono::{Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::error::Result;
use crate::legacy::{Context, Date, Field};
use crate::modern;

/// A legacy answer next to a modern one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SideBySide<T> {
    pub legacy: T,
    pub modern: T,
}

impl<T> SideBySide<T> {
    pub fn map<U, F>(self, f: F) -> SideBySide<U>
    where
        F: Fn(T) -> U,
    {
        SideBySide {
            legacy: f(self.legacy),
            modern: f(self.modern),
        }
    }
}

impl<T: PartialEq> SideBySide<T> {
    /// `true` if both styles gave the same answer.
    pub fn agree(&self) -> bool {
        self.legacy == self.modern
    }
}

fn to_legacy(ctx: &Context, date: NaiveDate) -> Result<Date> {
    ctx.a_date(date.year(), date.month() as i32, date.day() as i32)
}

pub fn format_date(ctx: &Context, date: NaiveDate, pattern: &str) -> Result<SideBySide<String>> {
    Ok(SideBySide {
        legacy: ctx.format(to_legacy(ctx, date)?, pattern)?,
        modern: modern::format_date(date, pattern)?,
    })
}

pub fn parse_date(ctx: &Context, text: &str, pattern: &str) -> Result<SideBySide<NaiveDate>> {
    Ok(SideBySide {
        legacy: ctx.local_date(ctx.string_to_date(text, pattern)?),
        modern: modern::parse_date(text, pattern)?,
    })
}

/// Disagrees in zones with daylight saving when the range crosses a change.
pub fn days_diff(ctx: &Context, from: NaiveDate, to: NaiveDate) -> Result<SideBySide<i64>> {
    Ok(SideBySide {
        legacy: ctx.days_diff(to_legacy(ctx, from)?, to_legacy(ctx, to)?)?,
        modern: modern::days_diff(from, to),
    })
}

pub fn is_working_day(ctx: &Context, date: NaiveDate) -> Result<SideBySide<bool>> {
    Ok(SideBySide {
        legacy: ctx.is_working_day(to_legacy(ctx, date)?),
        modern: modern::is_working_day(date),
    })
}

pub fn add_days(ctx: &Context, date: NaiveDate, days: i32) -> Result<SideBySide<NaiveDate>> {
    Ok(SideBySide {
        legacy: ctx.local_date(ctx.add_days(to_legacy(ctx, date)?, days)?),
        modern: modern::add_days(date, days.into())?,
    })
}

pub fn add_months(ctx: &Context, date: NaiveDate, months: i32) -> Result<SideBySide<NaiveDate>> {
    Ok(SideBySide {
        legacy: ctx.local_date(ctx.add_months(to_legacy(ctx, date)?, months)?),
        modern: modern::add_months(date, months)?,
    })
}

pub fn add_years(ctx: &Context, date: NaiveDate, years: i32) -> Result<SideBySide<NaiveDate>> {
    Ok(SideBySide {
        legacy: ctx.local_date(ctx.add_years(to_legacy(ctx, date)?, years)?),
        modern: modern::add_years(date, years)?,
    })
}

pub fn is_leap_year(ctx: &Context, date: NaiveDate) -> Result<SideBySide<bool>> {
    Ok(SideBySide {
        legacy: ctx.is_leap_year(to_legacy(ctx, date)?),
        modern: modern::is_leap_year(date),
    })
}

pub fn length_of_month(ctx: &Context, date: NaiveDate) -> Result<SideBySide<u32>> {
    Ok(SideBySide {
        legacy: ctx.length_of_month(to_legacy(ctx, date)?),
        modern: modern::length_of_month(date),
    })
}

pub fn last_day_of_month(ctx: &Context, date: NaiveDate) -> Result<SideBySide<NaiveDate>> {
    let cal = ctx.to_calendar(to_legacy(ctx, date)?);
    Ok(SideBySide {
        legacy: cal.last_day_of_month()?.date(),
        modern: modern::last_day_of_month(date),
    })
}

/// The two styles mean different things by "next Tuesday": the legacy one is
/// the Tuesday of next week, the modern one the first Tuesday after the date.
pub fn next_tuesday(ctx: &Context, date: NaiveDate) -> Result<SideBySide<NaiveDate>> {
    let cal = ctx.to_calendar(to_legacy(ctx, date)?);
    Ok(SideBySide {
        legacy: cal.next_tuesday()?.date(),
        modern: modern::next_tuesday(date)?,
    })
}

/// Parses `text` as wall-clock time in `from` and returns the hour of the
/// same instant in the zone named `to`.
pub fn hour_in_zone(
    ctx: &Context,
    text: &str,
    pattern: &str,
    from: Tz,
    to: &str,
) -> Result<SideBySide<u32>> {
    let cal = ctx.calendar_in_zone(text, pattern, from)?;
    let zoned = modern::zoned_date_time(text, pattern, from)?;
    Ok(SideBySide {
        legacy: cal.to_zone(to)?.get(Field::HourOfDay) as u32,
        modern: modern::to_time_zone(&zoned, to)?.hour(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contexts() -> [Context; 3] {
        [
            Context::default(),
            Context::new(Config::new().with_zone(chrono_tz::Europe::London)),
            Context::new(Config::new().with_zone(chrono_tz::Europe::Kiev)),
        ]
    }

    #[test]
    fn agreeing_tasks() {
        for ctx in contexts() {
            let zone = ctx.zone();
            let date = ymd(1987, 6, 10);
            let formatted = format_date(&ctx, date, "dd MMM yyyy").unwrap();
            assert_eq!("10 Jun 1987", formatted.legacy, "{zone}");
            assert!(formatted.agree(), "{zone}");
            assert!(parse_date(&ctx, "10 Jun 1987", "dd MMM yyyy").unwrap().agree(), "{zone}");
            assert!(days_diff(&ctx, ymd(2014, 5, 30), ymd(2014, 6, 10)).unwrap().agree(), "{zone}");
            assert!(add_days(&ctx, ymd(1987, 5, 30), 2).unwrap().agree(), "{zone}");
            assert!(add_months(&ctx, ymd(1987, 5, 31), 1).unwrap().agree(), "{zone}");
            assert!(add_years(&ctx, ymd(2012, 2, 29), 1).unwrap().agree(), "{zone}");
            assert!(is_working_day(&ctx, ymd(2014, 6, 8)).unwrap().agree(), "{zone}");
            assert!(is_leap_year(&ctx, ymd(2012, 6, 10)).unwrap().agree(), "{zone}");
            assert!(length_of_month(&ctx, ymd(2012, 2, 10)).unwrap().agree(), "{zone}");
            assert!(last_day_of_month(&ctx, ymd(2014, 2, 10)).unwrap().agree(), "{zone}");
        }
    }

    #[test]
    fn month_end_clamping() {
        let ctx = Context::default();
        let added = add_months(&ctx, ymd(1987, 5, 31), 1).unwrap();
        assert_eq!(ymd(1987, 6, 30), added.modern);
        let added = add_years(&ctx, ymd(2012, 2, 29), 1).unwrap();
        assert_eq!(ymd(2013, 2, 28), added.legacy);
    }

    #[test]
    fn distant_past() {
        let ctx = Context::default();
        let date = ymd(-5000, 3, 1);
        let next = add_days(&ctx, date, 1).unwrap();
        assert_eq!(SideBySide { legacy: ymd(-5000, 3, 2), modern: ymd(-5000, 3, 2) }, next);
        assert!(add_months(&ctx, ymd(-4801, 1, 31), 1).unwrap().agree());
        assert!(days_diff(&ctx, ymd(-4801, 2, 28), ymd(-4801, 3, 1)).unwrap().agree());
    }

    #[test]
    fn days_diff_across_summer_time() {
        let [utc, london, _] = contexts();
        let (from, to) = (ymd(2014, 3, 29), ymd(2014, 3, 31));
        assert_eq!(SideBySide { legacy: 2, modern: 2 }, days_diff(&utc, from, to).unwrap());
        assert_eq!(SideBySide { legacy: 1, modern: 2 }, days_diff(&london, from, to).unwrap());
    }

    #[test]
    fn next_tuesday_differs() {
        let ctx = Context::default();
        let next = next_tuesday(&ctx, ymd(2014, 6, 24)).unwrap();
        assert_eq!(ymd(2014, 7, 1), next.modern);
        assert_eq!(ymd(2014, 7, 1), next.legacy);

        let next = next_tuesday(&ctx, ymd(2014, 12, 29)).unwrap();
        assert_eq!(ymd(2014, 12, 30), next.modern);
        assert_eq!(ymd(2015, 1, 6), next.legacy);
        assert!(!next.agree());
    }

    #[test]
    fn hours_in_zones() {
        let ctx = Context::default();
        let london = chrono_tz::Europe::London;
        let pattern = "dd/MM/yyyy HH:mm";
        let hours = hour_in_zone(&ctx, "10/06/1987 13:00", pattern, london, "UTC").unwrap();
        assert_eq!(SideBySide { legacy: 12, modern: 12 }, hours);
        let hours = hour_in_zone(&ctx, "10/06/2014 13:00", pattern, london, "Europe/Kiev").unwrap();
        assert_eq!(SideBySide { legacy: 15, modern: 15 }, hours);
        assert!(hour_in_zone(&ctx, "10/06/2014 13:00", pattern, london, "Kiev/Nowhere").is_err());
    }

    #[test]
    fn map_both() {
        let both = SideBySide { legacy: 2, modern: 3 }.map(|n: i32| n * 2);
        assert_eq!(SideBySide { legacy: 4, modern: 6 }, both);
    }
}
