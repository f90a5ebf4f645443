//! iCalendar document parser (RFC 5545).
//!
//! Parses complete iCalendar documents into typed structures.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use super::values::{parse_date, parse_datetime, parse_duration, parse_integer, unescape_text};
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property, Value};

/// How the parser treats malformed input below the component level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Any malformed content line or value fails the whole document.
    Strict,
    /// Malformed content lines are skipped and malformed values are kept as
    /// [`Value::Unknown`]. Unbalanced components still fail.
    #[default]
    Lenient,
}

/// A content line together with its unfolded source text.
struct SourceLine {
    num: usize,
    content: ContentLine,
    text: String,
}

/// Parses an iCalendar document from a string, rejecting any malformed line.
///
/// ## Errors
///
/// Returns an error if the input is not valid iCalendar.
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    parse_with(input, Strictness::Strict)
}

/// Parses an iCalendar document with the given strictness.
///
/// ## Errors
///
/// Returns an error if the document structure is broken (no VCALENDAR,
/// unbalanced BEGIN/END), or, in strict mode, on the first malformed
/// content line or value.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_with(input: &str, strictness: Strictness) -> ParseResult<ICalendar> {
    tracing::debug!("Parsing iCalendar document");

    let lines = split_lines(input);

    if lines.is_empty() {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    }

    tracing::trace!(count = lines.len(), "Split lines");

    let mut content_lines = Vec::with_capacity(lines.len());
    for (num, text) in lines {
        match parse_content_line(&text, num) {
            Ok(content) => content_lines.push(SourceLine { num, content, text }),
            Err(e) if strictness == Strictness::Lenient => {
                tracing::warn!(error = %e, "Skipping malformed content line");
            }
            Err(e) => return Err(e),
        }
    }

    let mut iter = content_lines.into_iter();
    let begin = iter
        .next()
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))?;

    if begin.content.name != "BEGIN" {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, begin.num, 1));
    }

    let root = parse_component_body(&mut iter, &begin, strictness)?;

    if root.kind != Some(ComponentKind::Calendar) {
        tracing::warn!(name = %root.name, "Root component is not VCALENDAR");
        return Err(
            ParseError::new(ParseErrorKind::MissingBegin, begin.num, 1)
                .with_context(format!("expected {}", ComponentKind::Calendar)),
        );
    }

    tracing::debug!(events = root.events().len(), "iCalendar document parsed");

    Ok(ICalendar { root })
}

/// Parses the body of a component whose BEGIN line has already been read,
/// up to and including its matching END line.
fn parse_component_body(
    iter: &mut impl Iterator<Item = SourceLine>,
    begin: &SourceLine,
    strictness: Strictness,
) -> ParseResult<Component> {
    let component_name = begin.content.raw_value.trim().to_ascii_uppercase();
    let mut component = Component {
        kind: Some(ComponentKind::parse(&component_name)),
        name: component_name.clone(),
        source: begin.text.clone(),
        ..Component::default()
    };

    let mut last_line_num = begin.num;

    loop {
        let Some(line) = iter.next() else {
            return Err(
                ParseError::new(ParseErrorKind::MissingEnd, last_line_num, 1)
                    .with_context(format!("missing END:{component_name}")),
            );
        };
        last_line_num = line.num;

        match line.content.name.as_str() {
            "BEGIN" => {
                let nested = parse_component_body(iter, &line, strictness)?;
                push_source(&mut component.source, &nested.source);
                component.children.push(nested);
            }
            "END" => {
                let end_name = line.content.raw_value.trim().to_ascii_uppercase();
                if end_name != component_name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line.num, 1)
                            .with_context(format!(
                                "expected END:{component_name}, got END:{end_name}"
                            )),
                    );
                }
                push_source(&mut component.source, &line.text);
                break;
            }
            _ => {
                push_source(&mut component.source, &line.text);
                let property = parse_property(line.content, line.num, strictness)?;
                component.properties.push(property);
            }
        }
    }

    Ok(component)
}

fn push_source(source: &mut String, text: &str) {
    if !source.is_empty() {
        source.push_str("\r\n");
    }
    source.push_str(text);
}

/// Parses a property from a content line, resolving the value type.
fn parse_property(cl: ContentLine, line_num: usize, strictness: Strictness) -> ParseResult<Property> {
    let value_type = determine_value_type(&cl);

    let value = match parse_value(&cl.raw_value, value_type, cl.tzid(), line_num) {
        Ok(value) => value,
        Err(e) if strictness == Strictness::Lenient => {
            tracing::warn!(property = %cl.name, error = %e, "Keeping malformed value as unknown");
            Value::Unknown(cl.raw_value.clone())
        }
        Err(e) => return Err(e),
    };

    Ok(Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
    })
}

/// Determines the value type for a property.
fn determine_value_type(cl: &ContentLine) -> ValueType {
    // Explicit VALUE parameter wins
    if let Some(value_type) = cl.value_type() {
        return ValueType::from_param(value_type);
    }

    match cl.name.as_str() {
        "DTSTART" | "DTEND" | "DTSTAMP" | "CREATED" | "LAST-MODIFIED" | "COMPLETED" | "DUE"
        | "RECURRENCE-ID" => {
            let raw = cl.raw_value.trim();
            if raw.len() == 8 && !raw.contains(['T', 't']) {
                ValueType::Date
            } else {
                ValueType::DateTime
            }
        }

        "DURATION" | "TRIGGER" => {
            if cl.raw_value.starts_with(['P', '-', '+']) {
                ValueType::Duration
            } else {
                ValueType::DateTime
            }
        }

        "PERCENT-COMPLETE" | "PRIORITY" | "REPEAT" | "SEQUENCE" => ValueType::Integer,

        // Recurrence data is consumed from the raw text
        "RRULE" | "EXRULE" | "EXDATE" | "RDATE" => ValueType::Unknown,

        "URL" | "TZURL" | "SOURCE" => ValueType::Uri,

        "ATTENDEE" | "ORGANIZER" => ValueType::CalAddress,

        _ => ValueType::Text,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    CalAddress,
    Date,
    DateTime,
    Duration,
    Integer,
    Text,
    Uri,
    Unknown,
}

impl ValueType {
    fn from_param(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "INTEGER" => Self::Integer,
            "TEXT" => Self::Text,
            "URI" => Self::Uri,
            _ => Self::Unknown,
        }
    }
}

/// Parses a raw value string into a typed Value.
fn parse_value(
    raw: &str,
    value_type: ValueType,
    tzid: Option<&str>,
    line_num: usize,
) -> ParseResult<Value> {
    let raw_trimmed = raw.trim();
    match value_type {
        ValueType::Text => Ok(Value::Text(unescape_text(raw))),
        ValueType::DateTime => Ok(Value::DateTime(parse_datetime(
            raw_trimmed,
            tzid,
            line_num,
            1,
        )?)),
        ValueType::Date => Ok(Value::Date(parse_date(raw_trimmed, line_num, 1)?)),
        ValueType::Duration => Ok(Value::Duration(parse_duration(raw_trimmed, line_num, 1)?)),
        ValueType::Integer => Ok(Value::Integer(parse_integer(raw_trimmed, line_num, 1)?)),
        ValueType::CalAddress => Ok(Value::CalAddress(raw.to_string())),
        ValueType::Uri => Ok(Value::Uri(raw.to_string())),
        ValueType::Unknown => Ok(Value::Unknown(raw.to_string())),
    }
}
