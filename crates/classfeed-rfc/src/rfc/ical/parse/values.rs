//! Value type parsers for iCalendar (RFC 5545 §3.3).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{DateTime, DateTimeForm};

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit calendar date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<NaiveDate> {
    let err = || ParseError::new(ParseErrorKind::InvalidDate, line, col);

    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let year = s[0..4].parse::<i32>().map_err(|e| err().with_context(e.to_string()))?;
    let month = s[4..6].parse::<u32>().map_err(|e| err().with_context(e.to_string()))?;
    let day = s[6..8].parse::<u32>().map_err(|e| err().with_context(e.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| err().with_context(format!("no such date: {s}")))
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z"). Returns the time and
/// whether it carried the UTC designator. A leap second is clamped to :59.
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<(NaiveTime, bool)> {
    let err = || ParseError::new(ParseErrorKind::InvalidTime, line, col);

    let (time_str, is_utc) = match s.strip_suffix(['Z', 'z']) {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if time_str.len() != 6 || !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }

    let hour = time_str[0..2].parse::<u32>().map_err(|e| err().with_context(e.to_string()))?;
    let minute = time_str[2..4].parse::<u32>().map_err(|e| err().with_context(e.to_string()))?;
    let second = time_str[4..6].parse::<u32>().map_err(|e| err().with_context(e.to_string()))?;

    if second > 60 {
        return Err(err());
    }

    let time = NaiveTime::from_hms_opt(hour, minute, second.min(59)).ok_or_else(err)?;
    Ok((time, is_utc))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// TZID is a property parameter, so it is passed in separately. A UTC
/// designator wins over a TZID.
///
/// ## Errors
/// Returns an error if the string is not a valid datetime format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let t_pos = s
        .find(['T', 't'])
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(&s[..t_pos], line, col)?;
    let (time, is_utc) = parse_time(&s[t_pos + 1..], line, col + t_pos + 1)?;
    let local = NaiveDateTime::new(date, time);

    let form = match tzid {
        _ if is_utc => DateTimeForm::Utc,
        Some(tz) => DateTimeForm::Zoned {
            tzid: tz.to_string(),
        },
        None => DateTimeForm::Floating,
    };

    Ok(DateTime { local, form })
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: `[+|-]P[nW]` or `[+|-]P[nD][T[nH][nM][nS]]`
///
/// ## Errors
/// Returns an error if the string is not a valid duration format.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<TimeDelta> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);

    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let body = unsigned.strip_prefix('P').ok_or_else(err)?;

    let mut seconds: i64 = 0;
    let mut digits = String::new();
    let mut in_time = false;
    let mut components = 0;

    for c in body.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if c == 'T' {
            if in_time || !digits.is_empty() {
                return Err(err());
            }
            in_time = true;
            continue;
        }

        let unit: i64 = match (c, in_time) {
            ('W', false) => 604_800,
            ('D', false) => 86_400,
            ('H', true) => 3_600,
            ('M', true) => 60,
            ('S', true) => 1,
            _ => return Err(err().with_context(format!("unexpected '{c}'"))),
        };
        let n = digits
            .parse::<i64>()
            .map_err(|e| err().with_context(e.to_string()))?;
        digits.clear();

        seconds = n
            .checked_mul(unit)
            .and_then(|v| seconds.checked_add(v))
            .ok_or_else(err)?;
        components += 1;
    }

    if components == 0 || !digits.is_empty() {
        return Err(err());
    }

    TimeDelta::try_seconds(if negative { -seconds } else { seconds }).ok_or_else(err)
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    s.trim().parse().map_err(|e: std::num::ParseIntError| {
        ParseError::new(ParseErrorKind::InvalidInteger, line, col).with_context(e.to_string())
    })
}

/// Unescapes TEXT values (RFC 5545 §3.3.11).
///
/// Escape sequences: `\\` `\,` `\;` `\n` `\N`. Anything else after a
/// backslash is preserved as written. A single pass is applied, so a
/// double-escaped `\\,` comes out as the two characters `\,`.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(',') => result.push(','),
            Some(';') => result.push(';'),
            Some('\\') | None => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
        }
    }

    result
}
