//! VEVENT to [`RawEvent`] decoding.

use chrono::{NaiveDateTime, NaiveTime};

use super::event::{EventTime, RawEvent};
use crate::error::RfcResult;
use crate::rfc::ical::core::{Component, DateTimeForm, Property, Value};
use crate::rfc::ical::expand::{TimeZoneResolver, to_utc};
use crate::rfc::ical::parse::{Strictness, parse_with};

/// ## Summary
/// Parses an iCalendar document and decodes every top-level VEVENT, in
/// document order.
///
/// Floating DATE-TIME values take the calendar's `X-WR-TIMEZONE` when one is
/// declared. A TZID that cannot be resolved leaves the value floating.
///
/// ## Errors
/// Returns an error if the document cannot be parsed with the given
/// strictness.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn decode_events(input: &str, strictness: Strictness) -> RfcResult<Vec<RawEvent>> {
    let ical = parse_with(input, strictness)?;

    let mut decoder = EventDecoder {
        resolver: TimeZoneResolver::new(),
        default_tzid: ical.default_tzid(),
    };

    let events: Vec<RawEvent> = ical
        .events()
        .into_iter()
        .map(|component| decoder.decode(component))
        .collect();

    tracing::debug!(count = events.len(), "Decoded events");

    Ok(events)
}

struct EventDecoder<'a> {
    resolver: TimeZoneResolver,
    default_tzid: Option<&'a str>,
}

impl EventDecoder<'_> {
    fn decode(&mut self, component: &Component) -> RawEvent {
        let text = |name: &str| {
            component
                .get_property(name)
                .and_then(Property::as_text)
                .map(str::to_string)
        };

        let start = self.event_time(component.get_property("DTSTART"));
        let end = self
            .event_time(component.get_property("DTEND"))
            .or_else(|| {
                let duration = component.get_property("DURATION")?.as_duration()?;
                start?.checked_add(duration)
            })
            .or(start);

        let event = RawEvent {
            uid: text("UID"),
            summary: text("SUMMARY"),
            description: text("DESCRIPTION"),
            raw_description: component
                .get_property("DESCRIPTION")
                .map(|property| property.raw_value.clone()),
            location: text("LOCATION"),
            start,
            end,
            organizer: component
                .get_property("ORGANIZER")
                .map(Property::params_and_value),
            attendees: component
                .get_properties("ATTENDEE")
                .into_iter()
                .map(Property::params_and_value)
                .collect(),
            raw: component.source.clone(),
        };

        tracing::trace!(uid = ?event.uid, start = ?event.start, end = ?event.end, "Decoded event");
        event
    }

    fn event_time(&mut self, property: Option<&Property>) -> Option<EventTime> {
        let property = property?;
        match &property.value {
            Value::Date(date) => Some(EventTime::Floating(date.and_time(NaiveTime::MIN))),
            Value::DateTime(dt) => Some(match &dt.form {
                DateTimeForm::Utc => EventTime::Instant(dt.local.and_utc()),
                DateTimeForm::Zoned { tzid } => self.zoned(dt.local, tzid),
                DateTimeForm::Floating => match self.default_tzid {
                    Some(tzid) => self.zoned(dt.local, tzid),
                    None => EventTime::Floating(dt.local),
                },
            }),
            other => {
                tracing::debug!(property = %property.name, value = ?other, "Ignoring non-temporal value");
                None
            }
        }
    }

    fn zoned(&mut self, local: NaiveDateTime, tzid: &str) -> EventTime {
        match to_utc(local, tzid, &mut self.resolver) {
            Ok(instant) => EventTime::Instant(instant),
            Err(e) => {
                tracing::warn!(tzid, error = %e, "Treating date-time as floating");
                EventTime::Floating(local)
            }
        }
    }
}
