//! Typed property values (RFC 5545 §3.3).

use chrono::{NaiveDate, TimeDelta};

use super::DateTime;

/// Parsed value of a property. The raw string is preserved separately on
/// [`super::Property`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// CAL-ADDRESS value (typically a `mailto:` URI).
    CalAddress(String),
    /// DATE value.
    Date(NaiveDate),
    /// DATE-TIME value.
    DateTime(DateTime),
    /// DURATION value.
    Duration(TimeDelta),
    /// INTEGER value.
    Integer(i32),
    /// TEXT value (unescaped).
    Text(String),
    /// URI value.
    Uri(String),
    /// Value kept verbatim, either because its type is not modelled or
    /// because it failed to parse under lenient parsing.
    Unknown(String),
}

impl Value {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns whether the value was kept verbatim.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}
