//! Proleptic Gregorian day arithmetic through Julian day numbers (JDN).
//!
//! The legacy calendar normalizes its fields through these functions, so that
//! e.g. day 30 of February rolls over into March instead of being rejected.

/// Julian day number of 0000-03-01, where the 400-year eras start.
const ERA_START_JDN: i64 = 1721120;
/// Days in a 400-year era.
const DAYS_PER_ERA: i64 = 146097;

/// Returns the Julian day number of a Gregorian date.
///
/// Lenient: `month` and `day` may lie outside their usual ranges and are
/// carried into the neighbouring years and months. `year` is an astronomical
/// year number, i.e. 1 BC is `0`.
///
/// # Example
///
/// ```
/// use dattempo::civil;
///
/// assert_eq!(2451545, civil::jdn(2000, 1, 1));
/// assert_eq!(civil::jdn(2014, 3, 2), civil::jdn(2014, 2, 30));
/// assert_eq!(civil::jdn(2013, 12, 1), civil::jdn(2014, 0, 1));
/// ```
pub fn jdn(year: i64, month: i64, day: i64) -> i64 {
    let y = year + (month - 1).div_euclid(12);
    let m = (month - 1).rem_euclid(12) + 1;
    // Years start in March, so the leap day is the last day of the year.
    let (y, mp) = if m <= 2 { (y - 1, m + 9) } else { (y, m - 3) };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doy = (153 * mp + 2) / 5;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    ERA_START_JDN + era * DAYS_PER_ERA + doe + (day - 1)
}

/// Represents a Julian day number in the Gregorian calendar, in
/// `(year, month, day)` format.
///
/// # Example
///
/// ```
/// use dattempo::civil;
///
/// assert_eq!((2000, 1, 1), civil::gregorian(2451545));
/// ```
pub fn gregorian(jdn: i64) -> (i64, u32, u32) {
    let z = jdn - ERA_START_JDN;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month as u32, day as u32)
}

/// Number of days in `month` (`1..=12`) of `year`.
///
/// # Panics
///
/// Panics if `month` is not in `1..=12`.
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if YearType::from_gregorian(year).is_leap() => 29,
        2 => 28,
        _ => panic!("month {} not in 1..=12", month),
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i64) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gregorian() {
        assert_eq!(2440588, jdn(1970, 1, 1));
        assert_eq!(0, jdn(-4713, 11, 24));
        assert_eq!(-32410, jdn(-4801, 3, 1));
        assert_eq!(2459466, jdn(2021, 9, 8));
        assert_eq!(2446957, jdn(1987, 6, 10));
    }

    #[test]
    fn to_gregorian() {
        assert_eq!((1970, 1, 1), gregorian(2440588));
        assert_eq!((-4713, 11, 24), gregorian(0));
        assert_eq!((-4801, 3, 1), gregorian(-32410));
        assert_eq!((2021, 9, 8), gregorian(2459466));
        assert_eq!((2000, 1, 1), gregorian(2451545));
    }

    #[test]
    fn lenient_fields() {
        for ((y, m, d), expected) in [
            ((2014, 2, 30), (2014, 3, 2)),
            ((2012, 2, 30), (2012, 3, 1)),
            ((1987, 5, 33), (1987, 6, 2)),
            ((1987, 13, 1), (1988, 1, 1)),
            ((1987, 0, 31), (1986, 12, 31)),
            ((1987, 6, 0), (1987, 5, 31)),
            ((1987, -11, 1), (1986, 1, 1)),
            ((-4801, 3, 1), (-4801, 3, 1)),
            ((-4801, 0, 31), (-4802, 12, 31)),
            ((-5000, 2, 30), (-5000, 3, 2)),
            ((-5200, 2, 30), (-5200, 3, 1)),
        ] {
            assert_eq!(
                expected,
                gregorian(jdn(y, m, d)),
                "{y:04}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn round_trip_before_year_zero() {
        for day in (-40_000..40_000).step_by(37) {
            let (y, m, d) = gregorian(day);
            assert_eq!(day, jdn(y, m.into(), d.into()), "{y}-{m:02}-{d:02}");
            assert_eq!(day + 1, jdn(y, m.into(), i64::from(d) + 1), "{y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(28, days_in_month(2014, 2));
        assert_eq!(29, days_in_month(2012, 2));
        assert_eq!(29, days_in_month(2000, 2));
        assert_eq!(28, days_in_month(1900, 2));
        assert_eq!(30, days_in_month(1987, 6));
        assert_eq!(31, days_in_month(1987, 5));
    }

    #[test]
    fn year_types() {
        use YearType::*;
        for (year, expected) in [(2012, Leap), (2014, Common), (2000, Leap), (1900, Common)] {
            assert_eq!(expected, YearType::from_gregorian(year), "{year}");
        }
    }
}
