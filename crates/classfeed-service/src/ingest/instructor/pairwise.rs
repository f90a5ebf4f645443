//! Pairwise segment parser for `SURNAMES \, GIVEN NAMES` instructor lists.
//!
//! Feeds that double-escape their text render an instructor list as
//!
//! ```text
//! GARCIA LOPEZ \, MARIA (Principal) \n TORRES \, CARLOS \n
//! ```
//!
//! After splitting on the escaped comma, each segment after the first holds
//! the given names of one instructor followed by the surnames of the next.
//! The parser walks the segments with a cursor and hands the surplus of a
//! segment back to the list so it becomes the surname part of the next pair.

use regex::Regex;
use std::sync::LazyLock;

use super::{Instructor, InstructorEntry};
use crate::ingest::name::replace_escaped_breaks;

static ESCAPED_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\+,\s*").expect("valid escaped comma regex"));
static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("valid paren regex"));
static PRINCIPAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(\s*principal\s*\)").expect("valid principal regex"));

/// ## Summary
/// Parses a captured instructor list into display entries.
///
/// Falls back to the whole text as one verbatim name when no pair can be
/// formed. Returns an empty list only when the text is blank.
#[must_use]
pub fn parse_instructor_list(text: &str) -> Vec<Instructor> {
    let entries = parse_pairs(text);
    if !entries.is_empty() {
        return entries.into_iter().map(Instructor::Formatted).collect();
    }

    let verbatim = replace_escaped_breaks(text).replace('\\', "");
    let verbatim = verbatim.trim();
    if verbatim.is_empty() {
        Vec::new()
    } else {
        tracing::trace!(name = verbatim, "No instructor pairs, keeping text verbatim");
        vec![Instructor::Verbatim(verbatim.to_string())]
    }
}

/// Runs the pair state machine over the escaped-comma segments of `text`.
pub(crate) fn parse_pairs(text: &str) -> Vec<InstructorEntry> {
    let mut segments: Vec<String> = ESCAPED_COMMA.split(text).map(str::to_string).collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i + 1 < segments.len() {
        let surnames = surname_segment(&segments[i]);
        let next = replace_escaped_breaks(&segments[i + 1]).trim().to_string();

        let (candidate, leftover) = split_given_names(&next);

        if leftover.is_empty() {
            i += 2;
        } else {
            segments[i + 1] = leftover;
            i += 1;
        }

        let first_name_part = PAREN_GROUP.replace_all(&candidate, "").trim().to_string();
        let principal = PRINCIPAL.is_match(&candidate);

        let mut tokens: Vec<&str> = surnames.split_whitespace().collect();
        if principal && tokens.len() > 1 {
            tokens.reverse();
        }

        if first_name_part.is_empty() {
            tracing::trace!(candidate, "Skipping pair without given names");
            continue;
        }

        entries.push(InstructorEntry {
            first_name_part,
            surname_display: tokens.join(" "),
        });
    }

    entries
}

/// Cleans the segment that holds surnames.
fn surname_segment(segment: &str) -> String {
    replace_escaped_breaks(segment)
        .replace('\\', "")
        .trim()
        .trim_end_matches(',')
        .trim()
        .to_string()
}

/// Splits a segment into the given-name candidate and the leftover that
/// belongs to the next pair.
///
/// A closing parenthesis ends the candidate; otherwise only the first word
/// is taken.
fn split_given_names(segment: &str) -> (String, String) {
    if let Some(close) = segment.find(')') {
        let (candidate, rest) = segment.split_at(close + 1);
        return (candidate.to_string(), rest.trim().to_string());
    }

    let mut tokens = segment.split_whitespace();
    let candidate = tokens.next().unwrap_or_default().to_string();
    let leftover = tokens.collect::<Vec<_>>().join(" ");
    (candidate, leftover)
}

#[cfg(test)]
#[path = "pairwise_tests.rs"]
mod tests;
