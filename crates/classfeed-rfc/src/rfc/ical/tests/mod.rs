//! Document-level decoding tests.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::RfcError;
use crate::rfc::ical::{EventTime, Strictness, decode_events};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

const CLASS_FEED: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Campus//Schedule//ES\r\n\
BEGIN:VEVENT\r\n\
UID:calc-1@campus.edu\r\n\
SUMMARY:Calculo I\r\n\
DTSTART;TZID=America/Lima:20250818T080000\r\n\
DTEND;TZID=America/Lima:20250818T100000\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20251215T000000Z\r\n\
LOCATION:Salon: A-101\r\n\
DESCRIPTION:Instructor: GARCIA LOPEZ \\\\, MARIA (Principal) \\\\n\r\n\
ORGANIZER;CN=\"GARCIA, MARIA\":mailto:mgarcia@campus.edu\r\n\
ATTENDEE;CN=TORRES CARLOS;ROLE=REQ-PARTICIPANT:mailto:ctorres@campus.edu\r\n\
ATTENDEE:mailto:student@campus.edu\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:lab-1@campus.edu\r\n\
SUMMARY:Physics Lab\r\n\
DTSTART:20250819T140000Z\r\n\
DURATION:PT1H30M\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

#[test_log::test]
fn decode_class_feed() {
    let events = decode_events(CLASS_FEED, Strictness::Lenient).unwrap();
    assert_eq!(events.len(), 2);

    let calc = &events[0];
    assert_eq!(calc.uid.as_deref(), Some("calc-1@campus.edu"));
    assert_eq!(calc.summary.as_deref(), Some("Calculo I"));
    assert_eq!(calc.location.as_deref(), Some("Salon: A-101"));
    // Double-escaped feeds keep one level of escaping
    assert_eq!(
        calc.description.as_deref(),
        Some("Instructor: GARCIA LOPEZ \\, MARIA (Principal) \\n")
    );
    assert_eq!(
        calc.raw_description.as_deref(),
        Some("Instructor: GARCIA LOPEZ \\\\, MARIA (Principal) \\\\n")
    );
    assert_eq!(
        calc.start,
        Some(EventTime::Instant(Utc.with_ymd_and_hms(2025, 8, 18, 13, 0, 0).unwrap()))
    );
    assert_eq!(
        calc.end,
        Some(EventTime::Instant(Utc.with_ymd_and_hms(2025, 8, 18, 15, 0, 0).unwrap()))
    );
    assert_eq!(
        calc.organizer.as_deref(),
        Some("CN=\"GARCIA, MARIA\":mailto:mgarcia@campus.edu")
    );
    assert_eq!(
        calc.attendees,
        vec![
            "CN=TORRES CARLOS;ROLE=REQ-PARTICIPANT:mailto:ctorres@campus.edu".to_string(),
            "mailto:student@campus.edu".to_string(),
        ]
    );
    assert!(calc.raw.starts_with("BEGIN:VEVENT\r\n"));
    assert!(calc.raw.ends_with("\r\nEND:VEVENT"));
    assert!(
        calc.raw
            .contains("RRULE:FREQ=WEEKLY;BYDAY=MO,WE;UNTIL=20251215T000000Z\r\n")
    );
    assert!(!calc.raw.contains("Physics Lab"));
}

#[test]
fn end_is_derived_from_duration() {
    let events = decode_events(CLASS_FEED, Strictness::Lenient).unwrap();
    let lab = &events[1];

    assert_eq!(lab.start, Some(EventTime::Instant(at(2025, 8, 19, 14, 0).and_utc())));
    assert_eq!(lab.end, Some(EventTime::Instant(at(2025, 8, 19, 15, 30).and_utc())));
}

#[test]
fn end_defaults_to_start() {
    let input = "\
BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
DTSTART:20250901T090000\n\
END:VEVENT\n\
END:VCALENDAR\n";

    let events = decode_events(input, Strictness::Strict).unwrap();
    assert_eq!(events[0].start, Some(EventTime::Floating(at(2025, 9, 1, 9, 0))));
    assert_eq!(events[0].end, events[0].start);
}

#[test]
fn date_values_are_floating_midnight() {
    let input = "\
BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
DTSTART;VALUE=DATE:20250901\n\
DTEND;VALUE=DATE:20250902\n\
END:VEVENT\n\
END:VCALENDAR\n";

    let events = decode_events(input, Strictness::Strict).unwrap();
    assert_eq!(events[0].start, Some(EventTime::Floating(at(2025, 9, 1, 0, 0))));
    assert_eq!(events[0].end, Some(EventTime::Floating(at(2025, 9, 2, 0, 0))));
}

#[test_log::test]
fn unknown_tzid_degrades_to_floating() {
    let input = "\
BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
DTSTART;TZID=Campus Standard Time:20250901T090000\n\
END:VEVENT\n\
END:VCALENDAR\n";

    let events = decode_events(input, Strictness::Lenient).unwrap();
    assert_eq!(events[0].start, Some(EventTime::Floating(at(2025, 9, 1, 9, 0))));
}

#[test]
fn calendar_default_timezone_applies_to_floating_values() {
    let input = "\
BEGIN:VCALENDAR\n\
X-WR-TIMEZONE:America/Bogota\n\
BEGIN:VEVENT\n\
DTSTART:20250901T090000\n\
DTEND:20250901T110000Z\n\
END:VEVENT\n\
END:VCALENDAR\n";

    let events = decode_events(input, Strictness::Lenient).unwrap();
    // Bogota is UTC-5 all year
    assert_eq!(events[0].start, Some(EventTime::Instant(at(2025, 9, 1, 14, 0).and_utc())));
    assert_eq!(events[0].end, Some(EventTime::Instant(at(2025, 9, 1, 11, 0).and_utc())));
}

#[test_log::test]
fn lenient_skips_malformed_line_and_keeps_event() {
    let input = "\
BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
SUMMARY:Chemistry\n\
X-BROKEN;PARAM:value\n\
DTSTART:not-a-date\n\
LOCATION:Lab 3\n\
END:VEVENT\n\
END:VCALENDAR\n";

    let events = decode_events(input, Strictness::Lenient).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary.as_deref(), Some("Chemistry"));
    assert_eq!(events[0].location.as_deref(), Some("Lab 3"));
    assert_eq!(events[0].start, None);
    assert_eq!(events[0].end, None);

    let err = decode_events(input, Strictness::Strict).unwrap_err();
    assert!(matches!(err, RfcError::ParseError(_)));
}

#[test]
fn structural_errors_are_fatal_even_when_lenient() {
    let input = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Unclosed\n";
    let err = decode_events(input, Strictness::Lenient).unwrap_err();
    match err {
        RfcError::ParseError(e) => assert!(e.is_structural()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn nested_components_are_not_events() {
    let input = "\
BEGIN:VCALENDAR\n\
BEGIN:VTIMEZONE\n\
TZID:America/Lima\n\
END:VTIMEZONE\n\
BEGIN:VTODO\n\
SUMMARY:Homework\n\
END:VTODO\n\
BEGIN:VEVENT\n\
SUMMARY:Lecture\n\
BEGIN:VALARM\n\
DESCRIPTION:Reminder\n\
END:VALARM\n\
END:VEVENT\n\
END:VCALENDAR\n";

    let events = decode_events(input, Strictness::Lenient).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].summary.as_deref(), Some("Lecture"));
    assert_eq!(events[0].description, None);
}

#[test]
fn raw_description_keeps_text_escapes() {
    let input = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DESCRIPTION:Seccion: 0101\\nInstructor: TORRES \\, CARLOS \r\n \\n\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
SUMMARY:Sin descripcion\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    let events = decode_events(input, Strictness::Lenient).unwrap();
    assert_eq!(
        events[0].description.as_deref(),
        Some("Seccion: 0101\nInstructor: TORRES , CARLOS \n")
    );
    // Unfolded, but not unescaped
    assert_eq!(
        events[0].raw_description.as_deref(),
        Some("Seccion: 0101\\nInstructor: TORRES \\, CARLOS \\n")
    );
    assert_eq!(events[1].raw_description, None);
}
