//! Assembly of the final per-event class session.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use classfeed_rfc::rfc::ical::RawEvent;

use super::event::EventNormalizer;
use super::instructor::{Instructor, InstructorListParser};
use super::recurrence::extract_recurrence;
use super::weekday::WeekdaySet;

/// One class meeting pattern, extracted from one VEVENT.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassSession {
    pub title: String,
    pub room: String,
    /// Description exactly as decoded.
    pub description: String,
    /// Instructor display names in extraction order.
    pub instructors: Vec<String>,
    pub weekdays: WeekdaySet,
    pub until: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ClassSession {
    /// Instructor names joined with `", "`.
    #[must_use]
    pub fn instructor_display(&self) -> String {
        self.instructors.join(", ")
    }
}

/// ## Summary
/// Builds the [`ClassSession`] for one event.
///
/// Weekdays come from the recurrence rule, else the local start weekday.
/// The last date is the recurrence end, else the local end date.
#[must_use]
pub fn assemble(event: &RawEvent, display_tz: Tz, parser: &InstructorListParser) -> ClassSession {
    let normalized = EventNormalizer::new(display_tz).normalize(event);
    let recurrence = extract_recurrence(&event.raw);
    let instructors = parser
        .parse(event, &normalized.title)
        .iter()
        .map(Instructor::display_name)
        .collect();

    let weekdays = if recurrence.weekdays.is_empty() {
        normalized
            .start_day
            .map_or(WeekdaySet::EMPTY, WeekdaySet::from)
    } else {
        recurrence.weekdays
    };

    ClassSession {
        title: normalized.title,
        room: normalized.room,
        description: event.description.clone().unwrap_or_default(),
        instructors,
        weekdays,
        until: recurrence.until,
        start_time: normalized.start_time,
        end_time: normalized.end_time,
        date_from: normalized.date_from,
        date_to: recurrence.until.or(normalized.date_to),
    }
}
