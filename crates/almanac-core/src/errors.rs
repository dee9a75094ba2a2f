//! Error types for almanac.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is the single `thiserror`-derived [`Error`] enum below.  None of the
//! variants is fatal: a caller can reject the input, skip the match, or
//! rebuild the ledger and carry on.

use thiserror::Error;

/// The top-level error type used throughout almanac.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A date string or number could not be parsed, or names a day outside
    /// the supported range.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A holiday feed line or recurring-event record is missing a field or
    /// has a field that does not parse.
    #[error("malformed entry at line {line}: {reason}")]
    MalformedEntry {
        /// 1-based line in the source text (0 for a standalone record).
        line: usize,
        /// What was wrong with the entry.
        reason: String,
    },

    /// An ordinal was given for a day specifier that cannot count with it
    /// (e.g. a negative business-day ordinal).
    #[error("ordinal {ordinal} is not supported for {specifier}")]
    UnsupportedOrdinal {
        /// The rejected ordinal.
        ordinal: i32,
        /// The day specifier it was paired with.
        specifier: String,
    },

    /// A market-day search ran past its step cap, which means the ledger
    /// marks an implausibly long run of weekdays as holidays.
    #[error("no market day found within {steps} steps of {from}")]
    WalkerStalled {
        /// The date the search started from (YYYYMMDD).
        from: String,
        /// The cap that was exhausted.
        steps: u32,
    },

    /// The same date appears twice in a holiday source.
    #[error("duplicate holiday on {0}")]
    DuplicateHoliday(String),

    /// Reading a holiday feed failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Settings could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// Shorthand `Result` type used throughout almanac.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return early with [`Error::MalformedEntry`] unless `$cond` holds.
///
/// # Example
/// ```
/// use almanac_core::{ensure_entry, errors::Result};
/// fn two_fields(line: usize, s: &str) -> Result<()> {
///     ensure_entry!(s.contains(','), line, "expected `date,name`, got {s:?}");
///     Ok(())
/// }
/// assert!(two_fields(1, "20240101,New Year").is_ok());
/// assert!(two_fields(2, "20240101").is_err());
/// ```
#[macro_export]
macro_rules! ensure_entry {
    ($cond:expr, $line:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::MalformedEntry {
                line: $line,
                reason: format!($($msg)*),
            });
        }
    };
}
