//! RRULE scanning for class meeting days and end dates.
//!
//! Only BYDAY and UNTIL matter for a class schedule. The rule is read from
//! the event's raw text rather than a parsed property, so a broken rule can
//! never affect anything but the recurrence fields.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use super::weekday::WeekdaySet;

static RRULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^RRULE:([^\r\n]*)").expect("valid RRULE regex"));
static UNTIL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})").expect("valid UNTIL regex"));

/// Weekdays and inclusive end date of a recurring event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedRecurrence {
    /// Empty for non-recurring events.
    pub weekdays: WeekdaySet,
    pub until: Option<NaiveDate>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RecurrenceError {
    #[error("rule part without '=': {0:?}")]
    MalformedPart(String),

    #[error("UNTIL is not a calendar date: {0:?}")]
    InvalidUntil(String),
}

/// ## Summary
/// Extracts recurrence data from the unfolded text of one VEVENT.
///
/// Never fails: an event without an RRULE, or with a malformed one, yields
/// the empty recurrence.
#[must_use]
pub fn extract_recurrence(raw_event: &str) -> ParsedRecurrence {
    let Some(caps) = RRULE_LINE.captures(raw_event) else {
        return ParsedRecurrence::default();
    };

    let rule = &caps[1];
    match parse_rule(rule) {
        Ok(recurrence) => {
            tracing::trace!(rule, weekdays = %recurrence.weekdays, until = ?recurrence.until, "Parsed RRULE");
            recurrence
        }
        Err(e) => {
            tracing::debug!(rule, error = %e, "Ignoring malformed RRULE");
            ParsedRecurrence::default()
        }
    }
}

/// Parses the value part of an RRULE line.
pub(crate) fn parse_rule(rule: &str) -> Result<ParsedRecurrence, RecurrenceError> {
    let mut recurrence = ParsedRecurrence::default();

    for part in rule.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| RecurrenceError::MalformedPart(part.to_string()))?;

        match key.trim().to_ascii_uppercase().as_str() {
            "BYDAY" => {
                recurrence.weekdays = value
                    .split(',')
                    .filter_map(|code| WeekdaySet::index_of(code.trim()))
                    .collect();
            }
            "UNTIL" => recurrence.until = parse_until(value.trim())?,
            _ => {}
        }
    }

    Ok(recurrence)
}

/// Reads the leading `YYYYMMDD` of an UNTIL value, ignoring any time part.
fn parse_until(value: &str) -> Result<Option<NaiveDate>, RecurrenceError> {
    let Some(caps) = UNTIL_DATE.captures(value) else {
        return Ok(None);
    };

    let field = |i: usize| caps[i].parse::<u32>().ok();
    let date = field(1)
        .and_then(|y| i32::try_from(y).ok())
        .zip(field(2))
        .zip(field(3))
        .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d));

    date.map(Some)
        .ok_or_else(|| RecurrenceError::InvalidUntil(value.to_string()))
}
