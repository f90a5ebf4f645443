//! Decoded event record.

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// Start or end of a single event occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTime {
    /// An absolute instant, from a UTC or TZID-qualified DATE-TIME.
    Instant(DateTime<Utc>),
    /// A wall-clock value with no zone, from a floating DATE-TIME or a DATE
    /// (midnight).
    Floating(NaiveDateTime),
}

impl EventTime {
    /// ## Summary
    /// Returns the wall-clock time of this value in `tz`.
    ///
    /// Instants are converted; floating values are returned as written.
    #[must_use]
    pub fn to_local<Z: TimeZone>(&self, tz: &Z) -> NaiveDateTime {
        match self {
            Self::Instant(instant) => instant.with_timezone(tz).naive_local(),
            Self::Floating(local) => *local,
        }
    }

    /// Adds a duration, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        match self {
            Self::Instant(instant) => instant.checked_add_signed(delta).map(Self::Instant),
            Self::Floating(local) => local.checked_add_signed(delta).map(Self::Floating),
        }
    }
}

/// One VEVENT, decoded.
///
/// Text fields are TEXT-unescaped once; `raw_description` keeps DESCRIPTION
/// as written, with its `\,` and `\n` escapes intact. `organizer` and
/// `attendees` keep the property parameters in front of the address
/// (`CN=...:mailto:...`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub raw_description: Option<String>,
    pub location: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub organizer: Option<String>,
    pub attendees: Vec<String>,
    /// Unfolded `BEGIN:VEVENT` .. `END:VEVENT` text, CRLF-joined.
    pub raw: String,
}
