//! Field view of an instant, the way calendar objects of the legacy style
//! work: read a field, set a field, add to a field.
//!
//! Unlike the classic mutable calendar object, a [`Calendar`] is a plain
//! `Copy` value and every "mutator" returns a new one.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use super::Date;
use crate::civil;
use crate::error::{Error, Result};
use crate::modern::zoned;

pub(super) const MILLIS_PER_DAY: i64 = 86_400_000;

/// Calendar fields.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Field {
    Year,
    /// Month of year, `1..=12`. (Not 0-based.)
    Month,
    DayOfMonth,
    /// ISO-8601 numbering, `1..=7` for Monday through Sunday.
    DayOfWeek,
    /// Week of month, the week containing the 1st being week 1.
    WeekOfMonth,
    HourOfDay,
    Minute,
    Second,
    Millisecond,
}

/// An instant seen through the fields of a time zone.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use dattempo::legacy::{Calendar, Date, Field};
///
/// let date = Date::from_millis(550_281_600_000).unwrap(); // 1987-06-10T00:00Z
/// let cal = Calendar::new(date, chrono_tz::UTC, Weekday::Sun);
///
/// let cal = cal.add(Field::Month, 1).unwrap().set(Field::HourOfDay, 13).unwrap();
/// assert_eq!(7, cal.get(Field::Month));
/// assert_eq!(13, cal.get(Field::HourOfDay));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Calendar {
    instant: DateTime<Utc>,
    zone: Tz,
    first_day_of_week: Weekday,
}

/// Local fields before normalization. Any of them may be out of range.
#[derive(Debug, Copy, Clone)]
pub(super) struct Fields {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    milli: i64,
}

impl Fields {
    fn of(local: NaiveDateTime) -> Self {
        Fields {
            year: local.year().into(),
            month: local.month().into(),
            day: local.day().into(),
            hour: local.hour().into(),
            minute: local.minute().into(),
            second: local.second().into(),
            milli: (local.nanosecond() / 1_000_000).into(),
        }
    }

    pub(super) fn date(year: i64, month: i64, day: i64) -> Self {
        Fields {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            milli: 0,
        }
    }

    /// Carries every overflowing field into the next larger one.
    fn normalize(&self) -> Option<NaiveDateTime> {
        let millis = ((self.hour.checked_mul(60)? + self.minute).checked_mul(60)? + self.second)
            .checked_mul(1000)?
            .checked_add(self.milli)?;
        let jdn = civil::jdn(self.year, self.month, self.day) + millis.div_euclid(MILLIS_PER_DAY);
        let millis = millis.rem_euclid(MILLIS_PER_DAY);
        let (y, m, d) = civil::gregorian(jdn);
        let date = NaiveDate::from_ymd_opt(i32::try_from(y).ok()?, m, d)?;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(
            (millis / 1000) as u32,
            (millis % 1000) as u32 * 1_000_000,
        )?;
        Some(date.and_time(time))
    }

    fn clamp_day(&mut self) {
        let y = self.year + (self.month - 1).div_euclid(12);
        let m = (self.month - 1).rem_euclid(12) + 1;
        self.year = y;
        self.month = m;
        self.day = self.day.min(civil::days_in_month(y, m as u32).into());
    }
}

impl Calendar {
    /// Shows `date` in `zone`, with weeks starting on `first_day_of_week`.
    pub fn new(date: Date, zone: Tz, first_day_of_week: Weekday) -> Self {
        Calendar {
            instant: date.instant(),
            zone,
            first_day_of_week,
        }
    }

    pub(super) fn from_fields(
        fields: Fields,
        zone: Tz,
        first_day_of_week: Weekday,
    ) -> Result<Self> {
        let local = fields
            .normalize()
            .ok_or_else(|| Error::invalid(format!("calendar fields out of range: {fields:?}")))?;
        let instant = zoned::resolve_local(zone, local)?.with_timezone(&Utc);
        tracing::trace!(?fields, %local, %instant, "calendar fields normalized");
        Ok(Calendar {
            instant: truncate_millis(instant),
            zone,
            first_day_of_week,
        })
    }

    fn with_fields(&self, fields: Fields) -> Result<Self> {
        Self::from_fields(fields, self.zone, self.first_day_of_week)
    }

    fn fields(&self) -> Fields {
        Fields::of(self.local())
    }

    /// The instant.
    pub fn time(&self) -> Date {
        Date::from_instant(self.instant)
    }
    pub fn zone(&self) -> Tz {
        self.zone
    }
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }
    /// Wall-clock date and time in the calendar's zone.
    pub fn local(&self) -> NaiveDateTime {
        self.instant.with_timezone(&self.zone).naive_local()
    }
    /// Wall-clock date in the calendar's zone.
    pub fn date(&self) -> NaiveDate {
        self.local().date()
    }
    pub fn weekday(&self) -> Weekday {
        self.local().weekday()
    }

    /// The same instant seen from another zone.
    pub fn with_zone(&self, zone: Tz) -> Self {
        Calendar { zone, ..*self }
    }
    /// The same instant seen from UTC.
    pub fn to_utc(&self) -> Self {
        self.with_zone(Tz::UTC)
    }
    /// The same instant seen from the zone named `name`.
    pub fn to_zone(&self, name: &str) -> Result<Self> {
        Ok(self.with_zone(zoned::zone(name)?))
    }

    /// Reads a field.
    pub fn get(&self, field: Field) -> i32 {
        let local = self.local();
        match field {
            Field::Year => local.year(),
            Field::Month => local.month() as i32,
            Field::DayOfMonth => local.day() as i32,
            Field::DayOfWeek => local.weekday().number_from_monday() as i32,
            Field::WeekOfMonth => self.week_of_month(local.date(), local.day()),
            Field::HourOfDay => local.hour() as i32,
            Field::Minute => local.minute() as i32,
            Field::Second => local.second() as i32,
            Field::Millisecond => (local.nanosecond() / 1_000_000) as i32,
        }
    }

    fn week_of_month(&self, date: NaiveDate, day: u32) -> i32 {
        let first = date.with_day(1).unwrap_or(date).weekday();
        let offset = (first.num_days_from_monday() + 7
            - self.first_day_of_week.num_days_from_monday())
            % 7;
        ((day - 1 + offset) / 7 + 1) as i32
    }

    /// Largest value `field` can take at the current date, e.g. 29 for the
    /// day of month of any date in February 2012.
    pub fn actual_maximum(&self, field: Field) -> i32 {
        let date = self.date();
        match field {
            Field::Year => NaiveDate::MAX.year(),
            Field::Month => 12,
            Field::DayOfMonth => civil::days_in_month(date.year().into(), date.month()) as i32,
            Field::DayOfWeek => 7,
            Field::WeekOfMonth => {
                let last = civil::days_in_month(date.year().into(), date.month());
                self.week_of_month(date, last)
            }
            Field::HourOfDay => 23,
            Field::Minute | Field::Second => 59,
            Field::Millisecond => 999,
        }
    }

    /// Sets a field. Values out of range roll over into the neighbouring
    /// fields, e.g. day 30 of February is March 1 or 2.
    ///
    /// `DayOfWeek` moves within the current week and `WeekOfMonth` moves by
    /// whole weeks, keeping the day of week.
    pub fn set(&self, field: Field, value: i32) -> Result<Self> {
        let value = i64::from(value);
        let mut f = self.fields();
        match field {
            Field::Year => f.year = value,
            Field::Month => f.month = value,
            Field::DayOfMonth => f.day = value,
            Field::DayOfWeek => {
                let start = i64::from(self.first_day_of_week.number_from_monday());
                let current = i64::from(self.get(Field::DayOfWeek));
                f.day += (value - start).rem_euclid(7) - (current - start).rem_euclid(7);
            }
            Field::WeekOfMonth => {
                f.day += (value - i64::from(self.get(Field::WeekOfMonth))) * 7;
            }
            Field::HourOfDay => f.hour = value,
            Field::Minute => f.minute = value,
            Field::Second => f.second = value,
            Field::Millisecond => f.milli = value,
        }
        self.with_fields(f)
    }

    /// Resets a field to its default: 1970, January, the 1st, or zero for
    /// time fields. Clearing a week field changes nothing.
    pub fn clear(&self, field: Field) -> Result<Self> {
        match field {
            Field::Year => self.set(field, 1970),
            Field::Month | Field::DayOfMonth => self.set(field, 1),
            Field::DayOfWeek | Field::WeekOfMonth => Ok(*self),
            Field::HourOfDay | Field::Minute | Field::Second | Field::Millisecond => {
                self.set(field, 0)
            }
        }
    }

    /// Adds to a field.
    ///
    /// Years and months keep the day of month where possible and otherwise
    /// pin it to the month end. Days and weeks keep the wall-clock time.
    /// Time fields add elapsed time.
    pub fn add(&self, field: Field, amount: i32) -> Result<Self> {
        let amount = i64::from(amount);
        let mut f = self.fields();
        let unit = match field {
            Field::Year => {
                f.year += amount;
                f.clamp_day();
                return self.with_fields(f);
            }
            Field::Month => {
                f.month += amount;
                f.clamp_day();
                return self.with_fields(f);
            }
            Field::DayOfMonth | Field::DayOfWeek => {
                f.day += amount;
                return self.with_fields(f);
            }
            Field::WeekOfMonth => {
                f.day += amount * 7;
                return self.with_fields(f);
            }
            Field::HourOfDay => 3_600_000,
            Field::Minute => 60_000,
            Field::Second => 1000,
            Field::Millisecond => 1,
        };
        let instant = TimeDelta::try_milliseconds(amount * unit)
            .and_then(|delta| self.instant.checked_add_signed(delta))
            .ok_or_else(|| Error::invalid(format!("{field:?} + {amount} is out of range")))?;
        Ok(Calendar { instant, ..*self })
    }

    /// Sets the day to the last day of the month.
    pub fn last_day_of_month(&self) -> Result<Self> {
        self.set(Field::DayOfMonth, self.actual_maximum(Field::DayOfMonth))
    }

    /// One week ahead, then Tuesday of that week.
    ///
    /// With weeks starting on Sunday, Monday 2014-12-29 gives Tuesday
    /// 2015-01-06, not the next day.
    pub fn next_tuesday(&self) -> Result<Self> {
        self.add(Field::WeekOfMonth, 1)?
            .set(Field::DayOfWeek, Weekday::Tue.number_from_monday() as i32)
    }
}

pub(super) fn truncate_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(instant.timestamp_millis()).unwrap_or(instant)
}
