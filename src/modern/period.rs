//! Calendar amounts of years, months and days.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// An amount of calendar time.
///
/// Years and months are added together as one count of months, so the day
/// is clamped to the month end at most once; days are added after that.
///
/// ```
/// use dattempo::modern::{self, Period};
///
/// let date = modern::local_date(1987, 5, 30).unwrap();
/// assert_eq!("1987-06-01", Period::of_days(2).apply(date).unwrap().to_string());
/// ```
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i64,
}

impl Period {
    pub fn new(years: i32, months: i32, days: i64) -> Self {
        Self {
            years,
            months,
            days,
        }
    }
    pub fn of_days(days: i64) -> Self {
        Self::new(0, 0, days)
    }
    pub fn of_months(months: i32) -> Self {
        Self::new(0, months, 0)
    }
    pub fn of_years(years: i32) -> Self {
        Self::new(years, 0, 0)
    }

    /// Returns `date` shifted by this period.
    pub fn apply(&self, date: NaiveDate) -> Result<NaiveDate> {
        let months = self
            .years
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.months))
            .ok_or_else(|| Error::invalid(format!("{self} has too many months")))?;
        let date = super::add_months(date, months)?;
        super::add_days(date, self.days)
    }
}

/// ISO-8601 duration notation, e.g. `P1Y2M3D`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::default() {
            return f.write_str("P0D");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn apply() {
        assert_eq!(ymd(1987, 6, 1), Period::of_days(2).apply(ymd(1987, 5, 30)).unwrap());
        assert_eq!(ymd(1987, 6, 30), Period::of_months(1).apply(ymd(1987, 5, 31)).unwrap());
        assert_eq!(ymd(2013, 2, 28), Period::of_years(1).apply(ymd(2012, 2, 29)).unwrap());
        // 13 months: 2012-02-29 -> 2013-03-29, then one day.
        assert_eq!(ymd(2013, 3, 30), Period::new(1, 1, 1).apply(ymd(2012, 2, 29)).unwrap());
        // No clamp to 2013-02-28 on the way.
        assert_eq!(ymd(2013, 3, 29), Period::new(1, 1, 0).apply(ymd(2012, 2, 29)).unwrap());
        assert_eq!(ymd(2011, 12, 28), Period::new(1, -2, 0).apply(ymd(2011, 2, 28)).unwrap());
        assert!(matches!(
            Period::of_years(i32::MAX).apply(ymd(2012, 2, 29)),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(ymd(2012, 2, 29), Period::default().apply(ymd(2012, 2, 29)).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!("P0D", Period::default().to_string());
        assert_eq!("P2D", Period::of_days(2).to_string());
        assert_eq!("P1Y2M3D", Period::new(1, 2, 3).to_string());
        assert_eq!("P-1M", Period::of_months(-1).to_string());
    }
}
