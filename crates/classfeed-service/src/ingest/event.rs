//! Per-event normalization: title, room and local date/time fields.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

use classfeed_core::constants::UNTITLED_EVENT;
use classfeed_rfc::rfc::ical::{EventTime, RawEvent};

static ROOM_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)sal[oó]n:[ \t]*([^\r\n]*)").expect("valid room regex"));

/// Display-ready fields of one event, in the display timezone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedEvent {
    pub title: String,
    pub room: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub start_day: Option<Weekday>,
    pub end_day: Option<Weekday>,
    /// Whole calendar days between the local start and end dates.
    pub day_span: Option<i64>,
}

/// Converts [`RawEvent`]s into [`NormalizedEvent`]s for one display timezone.
#[derive(Debug, Clone, Copy)]
pub struct EventNormalizer {
    display_tz: Tz,
}

impl EventNormalizer {
    #[must_use]
    pub fn new(display_tz: Tz) -> Self {
        Self { display_tz }
    }

    #[must_use]
    pub fn display_tz(&self) -> Tz {
        self.display_tz
    }

    /// ## Summary
    /// Normalizes one event. Missing fields come out empty or `None`.
    #[must_use]
    pub fn normalize(&self, event: &RawEvent) -> NormalizedEvent {
        let start = event.start.map(|t| self.local(t));
        let end = event.end.map(|t| self.local(t));

        let date_from = start.map(|dt| dt.date());
        let date_to = end.map(|dt| dt.date());

        NormalizedEvent {
            title: resolve_title(event),
            room: extract_room(event.location.as_deref().unwrap_or_default()),
            start_time: start.map(|dt| to_minute(dt.time())),
            end_time: end.map(|dt| to_minute(dt.time())),
            date_from,
            date_to,
            start_day: date_from.map(|d| d.weekday()),
            end_day: date_to.map(|d| d.weekday()),
            day_span: date_from
                .zip(date_to)
                .map(|(from, to)| (to - from).num_days()),
        }
    }

    fn local(&self, time: EventTime) -> NaiveDateTime {
        time.to_local(&self.display_tz)
    }
}

/// Summary, else description, else a placeholder.
fn resolve_title(event: &RawEvent) -> String {
    [event.summary.as_deref(), event.description.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(UNTITLED_EVENT)
        .to_string()
}

/// ## Summary
/// Pulls the room out of a location such as `Edificio 3 - Salón: B204`.
///
/// Without a `Salón:`/`Salon:` label the whole location is the room.
#[must_use]
pub fn extract_room(location: &str) -> String {
    ROOM_LABEL
        .captures(location)
        .map_or(location, |caps| caps.get(1).map_or("", |m| m.as_str()))
        .trim()
        .to_string()
}

fn to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
