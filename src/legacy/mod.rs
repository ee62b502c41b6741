//! Legacy style: everything is an instant.
//!
//! A [`Date`] is a point on the time line, counted in milliseconds from the
//! Unix epoch. "A date" is midnight of that day in some zone, "a time" is that
//! time of day on 1970-01-01, and every field has to be read through a
//! [`Calendar`] in a zone. The zone, and the first day of the week, come from
//! a [`Context`] built from [`Config`] rather than from process-wide state.
//!
//! Construction is lenient: out-of-range fields roll over instead of failing.
//!
//! # Examples
//!
//! ```
//! use dattempo::legacy::Context;
//!
//! let ctx = Context::default();
//! let date = ctx.a_date(2014, 2, 30).unwrap();
//! assert_eq!("02 Mar 2014", ctx.format(date, "dd MMM yyyy").unwrap());
//!
//! let from = ctx.a_date(2014, 5, 30).unwrap();
//! let to = ctx.a_date(2014, 6, 10).unwrap();
//! assert_eq!(11, ctx.days_diff(from, to).unwrap());
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;

use crate::civil::YearType;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::modern::zoned;
use crate::pattern::Pattern;

mod calendar;

pub use calendar::{Calendar, Field};
use calendar::{Fields, MILLIS_PER_DAY, truncate_millis};

/// An instant, with millisecond precision.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    instant: DateTime<Utc>,
}

impl Date {
    /// Creates a `Date` from milliseconds since 1970-01-01T00:00Z.
    ///
    /// Returns `None` outside the range chrono can represent.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(|instant| Date { instant })
    }
    /// Milliseconds since 1970-01-01T00:00Z.
    pub fn millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }
    /// The current instant from the system clock.
    pub fn now() -> Self {
        Self::from_instant(Utc::now())
    }
    pub(crate) fn from_instant(instant: DateTime<Utc>) -> Self {
        Date {
            instant: truncate_millis(instant),
        }
    }
    pub(crate) fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Default zone and week layout for the legacy functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Context { config }
    }

    /// A context from [`Config::from_env`].
    pub fn from_env() -> Result<Self> {
        Config::from_env().map(Self::new)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn zone(&self) -> Tz {
        self.config.zone()
    }

    /// Midnight of the given day in the context zone. `month` is 1-based and
    /// out-of-range fields roll over: `(2014, 2, 30)` is 2014-03-02.
    pub fn a_date(&self, year: i32, month: i32, day: i32) -> Result<Date> {
        let fields = Fields::date(year.into(), month.into(), day.into());
        Ok(Calendar::from_fields(fields, self.zone(), self.config.first_day_of_week())?.time())
    }

    /// Parses `text` with a [`Pattern`] source; see [`Context::date_time`].
    pub fn string_to_date(&self, text: &str, pattern: &str) -> Result<Date> {
        self.date_time(text, &Pattern::new(pattern)?)
    }

    /// Parses `text` into an instant in the context zone.
    ///
    /// Date fields missing from the pattern default to 1970-01-01 and time
    /// fields to midnight, so `13:30` parsed with `HH:mm` is 13:30 on
    /// 1970-01-01. A pattern with an offset (`Z`, `XXX`) fixes the instant
    /// regardless of the zone. Zone names (`z`) cannot be parsed.
    pub fn date_time(&self, text: &str, pattern: &Pattern) -> Result<Date> {
        self.parse_in(text, pattern, self.zone())
    }

    fn parse_in(&self, text: &str, pattern: &Pattern, zone: Tz) -> Result<Date> {
        let fmt = pattern.parse_format()?;
        let err = |e| pattern.parse_error(text, e);
        if pattern.has_offset() {
            let dt = DateTime::parse_from_str(text, fmt).map_err(err)?;
            return Ok(Date::from_instant(dt.with_timezone(&Utc)));
        }
        let local = match (pattern.has_date(), pattern.has_time()) {
            (true, true) => NaiveDateTime::parse_from_str(text, fmt).map_err(err)?,
            (false, true) => {
                let time = NaiveTime::parse_from_str(text, fmt).map_err(err)?;
                NaiveDate::default().and_time(time)
            }
            _ => NaiveDate::parse_from_str(text, fmt)
                .map_err(err)?
                .and_time(NaiveTime::MIN),
        };
        Ok(Date::from_instant(
            zoned::resolve_local(zone, local)?.with_timezone(&Utc),
        ))
    }

    /// Formats `date` as seen in the context zone.
    pub fn format(&self, date: Date, pattern: &str) -> Result<String> {
        Pattern::new(pattern)?.format(&date.instant().with_timezone(&self.zone()))
    }

    pub fn to_calendar(&self, date: Date) -> Calendar {
        Calendar::new(date, self.zone(), self.config.first_day_of_week())
    }

    /// The wall-clock date of `date` in the context zone.
    pub fn local_date(&self, date: Date) -> NaiveDate {
        self.to_calendar(date).date()
    }

    /// Midnight of the same day: hour set to 0, smaller fields cleared.
    pub fn truncate_to_date(&self, date: Date) -> Result<Date> {
        Ok(self
            .to_calendar(date)
            .set(Field::HourOfDay, 0)?
            .clear(Field::Minute)?
            .clear(Field::Second)?
            .clear(Field::Millisecond)?
            .time())
    }

    /// Copies the time of day parsed from `time` onto the day of `date`.
    pub fn set_time_to_date(&self, date: Date, time: &str, pattern: &Pattern) -> Result<Date> {
        let time = self.to_calendar(self.date_time(time, pattern)?);
        let mut cal = self.to_calendar(date);
        for field in [
            Field::HourOfDay,
            Field::Minute,
            Field::Second,
            Field::Millisecond,
        ] {
            cal = cal.set(field, time.get(field))?;
        }
        Ok(cal.time())
    }

    /// Whole days between the midnights of `from` and `to`, by dividing the
    /// elapsed milliseconds by 24 hours.
    ///
    /// Only exact in zones without daylight saving: across a change to
    /// summer time one "day" is 23 hours long and the result comes out one
    /// short.
    pub fn days_diff(&self, from: Date, to: Date) -> Result<i64> {
        let from = self.truncate_to_date(from)?;
        let to = self.truncate_to_date(to)?;
        Ok((to.millis() - from.millis()) / MILLIS_PER_DAY)
    }

    pub fn year_of(&self, date: Date) -> i32 {
        self.to_calendar(date).get(Field::Year)
    }

    /// 1-based month number.
    pub fn month_of(&self, date: Date) -> i32 {
        self.to_calendar(date).get(Field::Month)
    }

    pub fn day_of(&self, date: Date) -> i32 {
        self.to_calendar(date).get(Field::DayOfMonth)
    }

    pub fn is_working_day(&self, date: Date) -> bool {
        !matches!(self.to_calendar(date).weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn add_days(&self, date: Date, days: i32) -> Result<Date> {
        self.add(date, Field::DayOfMonth, days)
    }

    pub fn add_months(&self, date: Date, months: i32) -> Result<Date> {
        self.add(date, Field::Month, months)
    }

    pub fn add_years(&self, date: Date, years: i32) -> Result<Date> {
        self.add(date, Field::Year, years)
    }

    pub fn add_minutes(&self, date: Date, minutes: i32) -> Result<Date> {
        self.add(date, Field::Minute, minutes)
    }

    pub fn add_seconds(&self, date: Date, seconds: i32) -> Result<Date> {
        self.add(date, Field::Second, seconds)
    }

    fn add(&self, date: Date, field: Field, amount: i32) -> Result<Date> {
        Ok(self.to_calendar(date).add(field, amount)?.time())
    }

    /// Parses `text` as wall-clock time in `zone` instead of the context zone.
    pub fn date_time_in_zone(&self, text: &str, pattern: &str, zone: Tz) -> Result<Date> {
        self.parse_in(text, &Pattern::new(pattern)?, zone)
    }

    /// Like [`Context::date_time_in_zone`], returning a calendar in `zone`.
    ///
    /// ```
    /// use dattempo::legacy::{Context, Field};
    ///
    /// let ctx = Context::default();
    /// let london = chrono_tz::Europe::London;
    /// let cal = ctx.calendar_in_zone("10/06/1987 13:00", "dd/MM/yyyy HH:mm", london).unwrap();
    /// assert_eq!(13, cal.get(Field::HourOfDay));
    /// assert_eq!(12, cal.to_utc().get(Field::HourOfDay));
    /// ```
    pub fn calendar_in_zone(&self, text: &str, pattern: &str, zone: Tz) -> Result<Calendar> {
        let date = self.date_time_in_zone(text, pattern, zone)?;
        Ok(Calendar::new(date, zone, self.config.first_day_of_week()))
    }

    pub fn is_leap_year(&self, date: Date) -> bool {
        YearType::from_gregorian(self.year_of(date).into()).is_leap()
    }

    pub fn length_of_month(&self, date: Date) -> u32 {
        self.to_calendar(date).actual_maximum(Field::DayOfMonth) as u32
    }
}

impl From<Config> for Context {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

impl TryFrom<&str> for Date {
    type Error = Error;

    /// Parses an RFC 3339 timestamp such as `1987-06-10T13:00:00+01:00`.
    fn try_from(text: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| Date::from_instant(dt.with_timezone(&Utc)))
            .map_err(|e| Error::parse(text, "RFC 3339", e))
    }
}
