//! Letter-based date/time format patterns, such as `dd MMM yyyy`.
//!
//! A [`Pattern`] is compiled once into a chrono format string and then used
//! for both parsing and formatting, by the legacy and the modern style alike.
//!
//! | Letters | Field |
//! |---|---|
//! | `y`, `yyyy` / `yy` | year / two-digit year |
//! | `M`, `MM`, `MMM`, `MMMM` | month: number, padded number, short name, full name (`L` is the same) |
//! | `d`, `dd` | day of month |
//! | `D`, `DDD` | day of year |
//! | `E`..`EEE`, `EEEE` | weekday name, short or full |
//! | `u` | ISO weekday number, Monday is 1 |
//! | `a` | AM/PM marker |
//! | `H`, `HH` / `h`, `hh` | hour 0-23 / hour 1-12 |
//! | `m`, `mm` / `s`, `ss` | minute / second |
//! | `SSS`, `SSSSSS`, `SSSSSSSSS` | fraction of second |
//! | `Z` / `XXX` / `z` | offset `+0100` / `+01:00` / zone abbreviation (formatting only) |
//!
//! Text between single quotes is copied literally and `''` stands for one
//! quote. Other characters that are not ASCII letters are literals too.

use std::fmt::{self, Write};
use std::str::FromStr;

use crate::error::{Error, Result};

/// A compiled format pattern.
///
/// # Example
///
/// ```
/// use dattempo::pattern::Pattern;
///
/// let pattern = Pattern::new("dd MMM yyyy").unwrap();
/// assert_eq!("%d %b %Y", pattern.strftime());
/// assert!(pattern.has_date() && !pattern.has_time());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    strftime: String,
    date: bool,
    time: bool,
    offset: bool,
    zone_name: bool,
}

impl Pattern {
    /// Compiles `source`.
    ///
    /// Returns [`Error::InvalidArgument`] for letters that have no meaning,
    /// unsupported repeat counts and unterminated quotes.
    pub fn new(source: &str) -> Result<Self> {
        let mut out = Pattern {
            source: source.to_owned(),
            strftime: String::with_capacity(source.len() * 2),
            date: false,
            time: false,
            offset: false,
            zone_name: false,
        };

        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    out.strftime.push('\'');
                    continue;
                }
                let mut closed = false;
                while let Some(q) = chars.next() {
                    if q == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            out.strftime.push('\'');
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    out.push_literal(q);
                }
                if !closed {
                    return Err(Error::invalid(format!(
                        "unterminated quote in pattern {source:?}"
                    )));
                }
                continue;
            }
            if !c.is_ascii_alphabetic() {
                out.push_literal(c);
                continue;
            }

            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            out.push_letter(c, count)?;
        }

        Ok(out)
    }

    fn push_literal(&mut self, c: char) {
        if c == '%' {
            self.strftime.push_str("%%");
        } else {
            self.strftime.push(c);
        }
    }

    fn push_letter(&mut self, letter: char, count: usize) -> Result<()> {
        let (spec, date, time, offset) = match (letter, count) {
            ('y', 2) => ("%y", true, false, false),
            ('y', _) => ("%Y", true, false, false),
            ('M' | 'L', 1) => ("%-m", true, false, false),
            ('M' | 'L', 2) => ("%m", true, false, false),
            ('M' | 'L', 3) => ("%b", true, false, false),
            ('M' | 'L', _) => ("%B", true, false, false),
            ('d', 1) => ("%-d", true, false, false),
            ('d', 2) => ("%d", true, false, false),
            ('D', 1 | 2) => ("%-j", true, false, false),
            ('D', 3) => ("%j", true, false, false),
            ('E', 1..=3) => ("%a", true, false, false),
            ('E', _) => ("%A", true, false, false),
            ('u', 1) => ("%u", true, false, false),
            ('a', 1) => ("%p", false, true, false),
            ('H', 1) => ("%-H", false, true, false),
            ('H', 2) => ("%H", false, true, false),
            ('h', 1) => ("%-I", false, true, false),
            ('h', 2) => ("%I", false, true, false),
            ('m', 1) => ("%-M", false, true, false),
            ('m', 2) => ("%M", false, true, false),
            ('s', 1) => ("%-S", false, true, false),
            ('s', 2) => ("%S", false, true, false),
            ('S', 3) => ("%3f", false, true, false),
            ('S', 6) => ("%6f", false, true, false),
            ('S', 9) => ("%9f", false, true, false),
            ('Z', 1..=3) => ("%z", false, false, true),
            ('X', 3) => ("%:z", false, false, true),
            ('z', 1..=3) => {
                self.zone_name = true;
                ("%Z", false, false, true)
            }
            _ => {
                return Err(Error::invalid(format!(
                    "unsupported pattern letters {:?} in {:?}",
                    letter.to_string().repeat(count),
                    self.source
                )));
            }
        };
        self.strftime.push_str(spec);
        self.date |= date;
        self.time |= time;
        self.offset |= offset;
        Ok(())
    }

    /// The pattern as it was given.
    pub fn source(&self) -> &str {
        &self.source
    }
    /// The equivalent chrono format string.
    pub fn strftime(&self) -> &str {
        &self.strftime
    }
    /// `true` if the pattern mentions any date field.
    pub fn has_date(&self) -> bool {
        self.date
    }
    /// `true` if the pattern mentions any time-of-day field.
    pub fn has_time(&self) -> bool {
        self.time
    }
    /// `true` if the pattern mentions a UTC offset or zone name.
    pub fn has_offset(&self) -> bool {
        self.offset
    }

    /// Renders a chrono value with this pattern.
    ///
    /// Fails with [`Error::InvalidArgument`] when the pattern asks for a field
    /// the value does not have, e.g. an hour from a plain date.
    pub fn format<T>(&self, value: &T) -> Result<String>
    where
        T: FormatWith,
    {
        let mut out = String::new();
        write!(out, "{}", value.format_with(&self.strftime)).map_err(|_| {
            Error::invalid(format!(
                "pattern {:?} asks for fields the value does not carry",
                self.source
            ))
        })?;
        Ok(out)
    }

    /// The chrono format string to parse with.
    ///
    /// Zone abbreviations (`z`) are only written, never read back: "BST" or
    /// "IST" alone does not name a zone. Patterns containing one are rejected
    /// with [`Error::InvalidArgument`].
    pub fn parse_format(&self) -> Result<&str> {
        if self.zone_name {
            tracing::debug!(pattern = %self.source, "zone name in parse pattern");
            return Err(Error::invalid(format!(
                "pattern {:?} has a zone name, which cannot be parsed",
                self.source
            )));
        }
        Ok(&self.strftime)
    }

    pub(crate) fn parse_error(&self, input: &str, source: chrono::ParseError) -> Error {
        Error::parse(input, &self.source, source)
    }
}

/// chrono values that can be rendered with a [`Pattern`].
pub trait FormatWith {
    fn format_with<'a>(&self, fmt: &'a str) -> impl fmt::Display + 'a;
}

impl FormatWith for chrono::NaiveDate {
    fn format_with<'a>(&self, fmt: &'a str) -> impl fmt::Display + 'a {
        self.format(fmt)
    }
}

impl FormatWith for chrono::NaiveTime {
    fn format_with<'a>(&self, fmt: &'a str) -> impl fmt::Display + 'a {
        self.format(fmt)
    }
}

impl FormatWith for chrono::NaiveDateTime {
    fn format_with<'a>(&self, fmt: &'a str) -> impl fmt::Display + 'a {
        self.format(fmt)
    }
}

impl<Tz> FormatWith for chrono::DateTime<Tz>
where
    Tz: chrono::TimeZone,
    Tz::Offset: fmt::Display,
{
    fn format_with<'a>(&self, fmt: &'a str) -> impl fmt::Display + 'a {
        self.format(fmt)
    }
}

impl FromStr for Pattern {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
