//! End-to-end extraction over calendar fixtures.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use classfeed_rfc::rfc::ical::Strictness;
use classfeed_service::error::ServiceError;
use classfeed_service::ingest::{
    ClassSession, ClassSessionExtractor, IcalDecoder, clean_name, to_suggestions,
};

const SEMESTER: &[u8] = include_bytes!("fixtures/semester.ics");
const FLOATING: &[u8] = include_bytes!("fixtures/floating.ics");

fn extract(input: &[u8], tz: Tz) -> Vec<ClassSession> {
    ClassSessionExtractor::new(IcalDecoder::new(Strictness::Lenient), tz)
        .extract(input)
        .expect("fixture should decode")
}

fn time(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test_log::test]
fn semester_sessions_in_document_order() {
    let sessions = extract(SEMESTER, Tz::America__Lima);

    let titles: Vec<&str> = sessions.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "CALCULO I",
            "FISICA GENERAL",
            "Tutoria",
            "Laboratorio de Quimica",
            "Seminario (Prof. Ana Ruiz)",
        ]
    );
}

#[test]
fn recurring_class_with_labelled_instructors() {
    let sessions = extract(SEMESTER, Tz::America__Lima);
    let calc = &sessions[0];

    assert_eq!(calc.room, "B204");
    assert_eq!(calc.instructors, vec!["MARIA LOPEZ GARCIA", "CARLOS TORRES"]);
    assert_eq!(calc.weekdays.codes(), vec!["MO", "WE", "FR"]);
    assert_eq!(calc.until, date(2025, 12, 15));
    assert_eq!(calc.start_time, time(8, 0));
    assert_eq!(calc.end_time, time(9, 50));
    assert_eq!(calc.date_from, date(2025, 8, 18));
    assert_eq!(calc.date_to, date(2025, 12, 15));
    assert!(calc.description.starts_with("Seccion: 0101\nInstructor: GARCIA LOPEZ , MARIA"));
}

#[test]
fn truncated_until_keeps_the_rest() {
    let sessions = extract(SEMESTER, Tz::America__Lima);
    let fisica = &sessions[1];

    assert_eq!(fisica.until, None);
    assert_eq!(fisica.weekdays.codes(), vec!["TU", "TH"]);
    // 15:00Z is 10:00 in Lima; DURATION gives the end
    assert_eq!(fisica.start_time, time(10, 0));
    assert_eq!(fisica.end_time, time(11, 40));
    assert_eq!(fisica.date_to, date(2025, 8, 19));
    assert_eq!(fisica.room, "Laboratorio 3");
    assert_eq!(fisica.instructors, vec!["DR. JANE DOE"]);
}

#[test]
fn fallback_name_sources() {
    let sessions = extract(SEMESTER, Tz::America__Lima);

    let tutoria = &sessions[2];
    assert_eq!(tutoria.instructors, vec!["LUIS VEGA"]);
    assert_eq!(tutoria.weekdays.codes(), vec!["FR"]);
    assert_eq!(tutoria.start_time, time(10, 0));

    let lab = &sessions[3];
    assert_eq!(lab.instructors, vec!["Rosa Diaz", "Pedro Gil"]);
    assert_eq!(lab.weekdays.codes(), vec!["SA"]);
    assert_eq!(lab.start_time, time(0, 0));
    assert_eq!(lab.end_time, time(0, 0));

    let seminario = &sessions[4];
    assert_eq!(seminario.instructors, vec!["Prof. Ana Ruiz"]);
    assert_eq!(seminario.weekdays.first(), Some(0));
}

#[test]
fn display_timezone_only_moves_instants() {
    let lima = extract(SEMESTER, Tz::America__Lima);
    let madrid = extract(SEMESTER, Tz::Europe__Madrid);

    // Instant: 13:00Z is 15:00 in Madrid (CEST)
    assert_eq!(madrid[0].start_time, time(15, 0));
    assert_eq!(lima[0].start_time, time(8, 0));

    // Floating: kept as written
    assert_eq!(madrid[2].start_time, lima[2].start_time);
}

#[test_log::test]
fn calendar_default_timezone_and_broken_event() {
    let sessions = extract(FLOATING, Tz::UTC);
    assert_eq!(sessions.len(), 2);

    let historia = &sessions[0];
    // 18:00 in Bogota is 23:00 UTC
    assert_eq!(historia.start_time, time(23, 0));
    assert_eq!(historia.end_time, time(1, 0));
    assert_eq!(historia.date_from, date(2025, 9, 1));
    assert_eq!(historia.date_to, date(2025, 9, 2));
    assert_eq!(historia.weekdays.codes(), vec!["MO"]);
    assert_eq!(historia.instructors, vec!["PILAR SALAS"]);

    let broken = &sessions[1];
    assert_eq!(broken.title, "Reunion de coordinacion");
    assert!(broken.weekdays.is_empty());
    assert_eq!(broken.until, None);
    assert_eq!(broken.start_time, None);
    assert!(broken.instructors.is_empty());
}

#[test]
fn strict_decoding_rejects_malformed_lines() {
    let extractor = ClassSessionExtractor::new(IcalDecoder::new(Strictness::Strict), Tz::UTC);
    let err = extractor.extract(SEMESTER).unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)));
}

#[test]
fn suggestions_for_review() {
    let sessions = extract(SEMESTER, Tz::America__Lima);
    let suggestions = to_suggestions("ics", &sessions);

    let json = serde_json::to_value(&suggestions).unwrap();
    assert_eq!(json[0]["id"], "ics-1");
    assert_eq!(json[0]["type"], "class");
    assert_eq!(json[0]["instructor"], "MARIA LOPEZ GARCIA, CARLOS TORRES");
    assert_eq!(json[0]["day"], 1);
    assert_eq!(json[0]["byday"], serde_json::json!(["MO", "WE", "FR"]));
    assert_eq!(json[0]["startTime"], "08:00");
    assert_eq!(json[0]["dateTo"], "2025-12-15");
    assert_eq!(json[4]["id"], "ics-5");
    assert_eq!(json[4]["day"], 0);
}

#[test]
fn cleaned_instructor_names_are_stable() {
    for session in extract(SEMESTER, Tz::UTC) {
        for name in &session.instructors {
            assert_eq!(&clean_name(name), name);
        }
    }
}

fn single_event(description: &str) -> Vec<u8> {
    format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Quimica\r\n\
         DTSTART:20250901T130000Z\r\nDESCRIPTION:{description}\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
    )
    .into_bytes()
}

#[test]
fn instructor_list_in_a_standard_feed() {
    let input = single_event(r"Instructor: GARCIA LOPEZ \, MARIA (Principal) \n TORRES \, CARLOS \n");
    let sessions = extract(&input, Tz::UTC);
    assert_eq!(
        sessions[0].instructors,
        vec!["MARIA LOPEZ GARCIA", "CARLOS TORRES"]
    );
}

#[test]
fn instructor_label_after_an_escaped_line() {
    let single = single_event(r"Seccion: 0101\nInstructor: GARCIA LOPEZ \, MARIA (Principal) \n TORRES \, CARLOS \n");
    let double = single_event(
        r"Seccion: 0101\\nInstructor: GARCIA LOPEZ \\, MARIA (Principal) \\n TORRES \\, CARLOS \\n",
    );

    for input in [single, double] {
        let sessions = extract(&input, Tz::UTC);
        assert_eq!(
            sessions[0].instructors,
            vec!["MARIA LOPEZ GARCIA", "CARLOS TORRES"]
        );
    }
}
