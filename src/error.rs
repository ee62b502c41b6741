//! Error type shared by every module of the crate.

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Returned when the input text does not match the supplied pattern.
    #[error("cannot parse {input:?} with pattern {pattern:?}: {source}")]
    Parse {
        /// The text that was being parsed.
        input: String,
        /// The pattern as given by the caller.
        pattern: String,
        /// What chrono reported.
        #[source]
        source: chrono::ParseError,
    },

    /// Returned when an argument is outside what the operation accepts, e.g.
    /// a non-positive working-day count or an unknown time zone.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn parse(input: &str, pattern: &str, source: chrono::ParseError) -> Self {
        tracing::debug!(input, pattern, %source, "parse failed");
        Error::Parse {
            input: input.to_owned(),
            pattern: pattern.to_owned(),
            source,
        }
    }
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
