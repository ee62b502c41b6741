//! Zoned date-times: a local date-time pinned to an IANA time zone.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};
use crate::pattern::Pattern;

/// Looks up an IANA time zone by name, e.g. `Europe/London` or `UTC`.
pub fn zone(name: &str) -> Result<Tz> {
    name.parse().map_err(|_| {
        tracing::debug!(name, "unknown time zone");
        Error::invalid(format!("unknown time zone {name:?}"))
    })
}

/// Parses a local date-time and places it in `zone`.
///
/// A local time that falls in a daylight-saving gap is moved forward by the
/// length of the gap; one that occurs twice takes the earlier offset.
///
/// # Example
///
/// ```
/// use chrono::Timelike;
/// use dattempo::modern;
///
/// let london = modern::zone("Europe/London").unwrap();
/// let dt = modern::zoned_date_time("10/06/1987 13:00", "dd/MM/yyyy HH:mm", london).unwrap();
/// assert_eq!(13, dt.hour());
/// assert_eq!(12, modern::to_utc(&dt).hour());
/// ```
pub fn zoned_date_time(text: &str, pattern: &str, zone: Tz) -> Result<DateTime<Tz>> {
    let pattern = Pattern::new(pattern)?;
    let local = NaiveDateTime::parse_from_str(text, pattern.parse_format()?)
        .map_err(|e| pattern.parse_error(text, e))?;
    resolve_local(zone, local)
}

/// Maps a wall-clock time in `zone` to an instant.
pub(crate) fn resolve_local(zone: Tz, local: NaiveDateTime) -> Result<DateTime<Tz>> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            let out_of_range = || Error::invalid(format!("{local} is out of range in {zone}"));
            let before = local
                .checked_sub_signed(TimeDelta::days(1))
                .ok_or_else(out_of_range)?;
            let offset = zone.offset_from_utc_datetime(&before).fix();
            let utc = local
                .checked_sub_signed(TimeDelta::seconds(offset.local_minus_utc().into()))
                .ok_or_else(out_of_range)?;
            let dt = zone.from_utc_datetime(&utc);
            tracing::debug!(%local, %zone, resolved = %dt, "local time in gap");
            Ok(dt)
        }
    }
}

/// The same instant in UTC.
pub fn to_utc(date_time: &DateTime<Tz>) -> DateTime<Utc> {
    date_time.with_timezone(&Utc)
}

/// The same instant in the zone named `name`.
pub fn to_time_zone(date_time: &DateTime<Tz>, name: &str) -> Result<DateTime<Tz>> {
    Ok(date_time.with_timezone(&zone(name)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const DMY_HM: &str = "dd/MM/yyyy HH:mm";

    #[test]
    fn known_zones() {
        assert_eq!(Tz::UTC, zone("UTC").unwrap());
        assert_eq!(chrono_tz::Europe::Kiev, zone("Europe/Kiev").unwrap());
        assert!(matches!(zone("Europe/Atlantis"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn create_in_zone() {
        let london = zone("Europe/London").unwrap();
        let dt = zoned_date_time("10/06/1987 13:00", DMY_HM, london).unwrap();
        assert_eq!(13, dt.hour());
        assert_eq!("1987-06-10T13:00:00+01:00", dt.to_rfc3339());
    }

    #[test]
    fn convert_to_utc() {
        let london = zone("Europe/London").unwrap();
        let dt = zoned_date_time("10/06/1987 13:00", DMY_HM, london).unwrap();
        assert_eq!(12, to_utc(&dt).hour());
        let winter = zoned_date_time("10/12/1987 13:00", DMY_HM, london).unwrap();
        assert_eq!(13, to_utc(&winter).hour());
    }

    #[test]
    fn convert_between_zones() {
        let london = zone("Europe/London").unwrap();
        let dt = zoned_date_time("10/06/2014 13:00", DMY_HM, london).unwrap();
        assert_eq!(15, to_time_zone(&dt, "Europe/Kiev").unwrap().hour());
        // Kiev kept Moscow time until 1990.
        let dt = zoned_date_time("10/06/1987 13:00", DMY_HM, london).unwrap();
        assert_eq!(16, to_time_zone(&dt, "Europe/Kiev").unwrap().hour());
        assert!(to_time_zone(&dt, "Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn gap_and_overlap() {
        let london = zone("Europe/London").unwrap();
        // Clocks went from 01:00 to 02:00 on 2014-03-30.
        let dt = zoned_date_time("30/03/2014 01:30", DMY_HM, london).unwrap();
        assert_eq!("2014-03-30T02:30:00+01:00", dt.to_rfc3339());
        // And from 02:00 back to 01:00 on 2014-10-26.
        let dt = zoned_date_time("26/10/2014 01:30", DMY_HM, london).unwrap();
        assert_eq!("2014-10-26T01:30:00+01:00", dt.to_rfc3339());
    }

    #[test]
    fn parse_failure() {
        let london = zone("Europe/London").unwrap();
        assert!(matches!(
            zoned_date_time("10/06/1987", DMY_HM, london),
            Err(Error::Parse { .. })
        ));
        assert!(matches!(
            zoned_date_time("10/06/1987 13:00 BST", "dd/MM/yyyy HH:mm z", london),
            Err(Error::InvalidArgument(_))
        ));
    }
}
