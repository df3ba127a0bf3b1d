//! Human-readable duration parsing.
//!
//! Delays can be given as a plain number of milliseconds or as a short string
//! with a unit suffix:
//!
//! | Input      | Meaning          |
//! |------------|------------------|
//! | `250`      | 250 milliseconds |
//! | `"250ms"`  | 250 milliseconds |
//! | `"2s"`     | 2 seconds        |
//! | `"1m"`     | 1 minute         |
//!
//! # Examples
//!
//! ```rust
//! use tideline::duration::{parse_duration, DurationSpec};
//! use std::time::Duration;
//!
//! assert_eq!(parse_duration("2s"), Ok(Duration::from_secs(2)));
//! assert_eq!(DurationSpec::from(150u64).to_duration(), Ok(Duration::from_millis(150)));
//! assert!(parse_duration("soon").is_err());
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Error returned when a duration cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// The value is out of range: a negative millisecond count, or a
    /// string that overflows.
    Invalid(String),
    /// The value is not in any recognized format.
    Unknown(String),
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(input) => write!(f, "invalid duration: \"{}\"", input),
            Self::Unknown(input) => write!(f, "unknown duration: \"{}\"", input),
        }
    }
}

impl std::error::Error for DurationError {}

/// A duration as supplied by a caller, before it has been validated.
///
/// Conversions exist from the usual ways of writing a delay, so APIs can take
/// `impl Into<DurationSpec>`:
///
/// ```rust
/// use tideline::duration::DurationSpec;
/// use std::time::Duration;
///
/// let specs: Vec<DurationSpec> = vec![
///     "100ms".into(),
///     100u64.into(),
///     Duration::from_millis(100).into(),
/// ];
///
/// for spec in specs {
///     assert_eq!(spec.to_duration(), Ok(Duration::from_millis(100)));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationSpec {
    /// A signed millisecond count. Negative values are rejected on conversion.
    Millis(i64),
    /// A string such as `"500ms"`, `"3s"` or `"1m"`.
    Text(String),
    /// An already-constructed duration.
    Exact(Duration),
}

impl DurationSpec {
    /// Resolve this spec into a concrete [`Duration`].
    pub fn to_duration(&self) -> Result<Duration, DurationError> {
        match self {
            Self::Millis(ms) => u64::try_from(*ms)
                .map(Duration::from_millis)
                .map_err(|_| DurationError::Invalid(ms.to_string())),
            Self::Text(text) => parse_duration(text),
            Self::Exact(d) => Ok(*d),
        }
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => write!(f, "{}ms", ms),
            Self::Text(text) => f.write_str(text),
            Self::Exact(d) => write!(f, "{}ms", d.as_millis()),
        }
    }
}

impl From<&str> for DurationSpec {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DurationSpec {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for DurationSpec {
    fn from(ms: u64) -> Self {
        Self::Millis(i64::try_from(ms).unwrap_or(i64::MAX))
    }
}

impl From<i64> for DurationSpec {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<Duration> for DurationSpec {
    fn from(d: Duration) -> Self {
        Self::Exact(d)
    }
}

impl FromStr for DurationSpec {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)?;
        Ok(Self::Text(s.to_string()))
    }
}

/// Parse a duration string with a `ms`, `s` or `m` suffix.
///
/// The whole input must be a non-empty run of ASCII digits followed by the
/// unit; no whitespace or sign is accepted. Anything else is
/// [`DurationError::Unknown`]. [`DurationError::Invalid`] is reserved for
/// values that match but overflow.
///
/// ```rust
/// use tideline::duration::{parse_duration, DurationError};
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("10ms"), Ok(Duration::from_millis(10)));
/// assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
/// assert_eq!(parse_duration(" 10ms "), Err(DurationError::Unknown(" 10ms ".into())));
/// assert_eq!(parse_duration("-5s"), Err(DurationError::Unknown("-5s".into())));
/// ```
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    // "ms" must be checked before "m" and "s".
    let (digits, unit_ms): (&str, u64) = if let Some(n) = input.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = input.strip_suffix('s') {
        (n, 1_000)
    } else if let Some(n) = input.strip_suffix('m') {
        (n, 60_000)
    } else {
        return Err(DurationError::Unknown(input.to_string()));
    };

    if !is_digits(digits) {
        return Err(DurationError::Unknown(input.to_string()));
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit_ms))
        .map(Duration::from_millis)
        .ok_or_else(|| DurationError::Invalid(input.to_string()))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
