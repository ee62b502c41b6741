//! Settings the legacy calendar style otherwise takes from process-wide state.

use chrono::Weekday;
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Environment variable naming the default time zone, e.g. `Europe/London`.
pub const ENV_ZONE: &str = "DATTEMPO_TZ";
/// Environment variable naming the first day of week, e.g. `Mon` or `Sunday`.
pub const ENV_FIRST_DAY_OF_WEEK: &str = "DATTEMPO_FIRST_DAY_OF_WEEK";

/// Default time zone and week layout for [`legacy::Context`](crate::legacy::Context).
///
/// Defaults: UTC, weeks starting on Sunday.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use dattempo::Config;
///
/// let config = Config::new()
///     .with_zone(chrono_tz::Europe::London)
///     .with_first_day_of_week(Weekday::Mon);
///
/// assert_eq!("Europe/London", config.zone().name());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    zone: Tz,
    first_day_of_week: Weekday,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            zone: Tz::UTC,
            first_day_of_week: Weekday::Sun,
        }
    }

    /// Sets the time zone dates are interpreted in.
    pub fn with_zone(mut self, zone: Tz) -> Self {
        self.zone = zone;
        self
    }

    /// Sets the day weeks start on.
    pub fn with_first_day_of_week(mut self, weekday: Weekday) -> Self {
        self.first_day_of_week = weekday;
        self
    }

    /// Returns the time zone.
    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Returns the first day of week.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Reads [`ENV_ZONE`] and [`ENV_FIRST_DAY_OF_WEEK`] from the process
    /// environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], with variables looked up through `lookup`.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Weekday;
    /// use dattempo::Config;
    ///
    /// let config = Config::from_vars(|key| match key {
    ///     "DATTEMPO_TZ" => Some("Europe/Kiev".to_owned()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!("Europe/Kiev", config.zone().name());
    /// assert_eq!(Weekday::Sun, config.first_day_of_week());
    /// ```
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();
        if let Some(name) = lookup(ENV_ZONE) {
            let name = name.trim();
            config.zone = name.parse().map_err(|_| {
                Error::invalid(format!("{ENV_ZONE}: unknown time zone {name:?}"))
            })?;
        }
        if let Some(day) = lookup(ENV_FIRST_DAY_OF_WEEK) {
            let day = day.trim();
            config.first_day_of_week = day.parse().map_err(|_| {
                Error::invalid(format!("{ENV_FIRST_DAY_OF_WEEK}: not a weekday {day:?}"))
            })?;
        }
        tracing::debug!(zone = %config.zone, first_day_of_week = %config.first_day_of_week, "config loaded");
        Ok(config)
    }
}
