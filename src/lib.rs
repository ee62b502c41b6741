//! Everyday date and time calculations, done two ways.
//!
//! The [`legacy`] module works the way calendar APIs built around instants do:
//! a date is a millisecond count, fields are read through a [`legacy::Calendar`]
//! in a zone, and construction quietly rolls over out-of-range fields. The
//! [`modern`] module does the same jobs with separate immutable value types
//! from `chrono`. [`compare`] runs a task through both and shows where the
//! answers differ.
//!
//! # Examples
//!
//! The modern style:
//!
//! ```
//! use dattempo::modern;
//!
//! let sunday = modern::local_date(2014, 8, 10).unwrap();
//! let due = modern::adjust_working_days(sunday, 10).unwrap();
//! assert_eq!("2014-08-22", due.to_string());
//!
//! assert!(modern::local_date(2014, 2, 30).is_err());
//! ```
//!
//! The legacy style, with the default zone taken from a [`Config`]:
//!
//! ```
//! use dattempo::Config;
//! use dattempo::legacy::Context;
//!
//! let ctx = Context::new(Config::new().with_zone(chrono_tz::Europe::London));
//! let from = ctx.a_date(2014, 3, 29).unwrap();
//! let to = ctx.a_date(2014, 3, 31).unwrap();
//! // Summer time started in between, so one of the "days" is 23 hours long.
//! assert_eq!(1, ctx.days_diff(from, to).unwrap());
//! ```
//!
//! Both at once:
//!
//! ```
//! use dattempo::{compare, legacy::Context, modern};
//!
//! let ctx = Context::default();
//! let date = modern::local_date(2012, 2, 29).unwrap();
//! let next_year = compare::add_years(&ctx, date, 1).unwrap();
//! assert!(next_year.agree());
//! assert_eq!("2013-02-28", next_year.modern.to_string());
//! ```
//!
//! Nothing here installs a `tracing` subscriber; parse failures and zone
//! lookups are reported at `debug` level for callers that do.

pub mod civil;
pub mod compare;
pub mod config;
pub mod error;
pub mod legacy;
pub mod modern;
pub mod pattern;

pub use config::Config;
pub use error::{Error, Result};
