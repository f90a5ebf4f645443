//! Places an instructor name can be found in an event.

use regex::Regex;
use std::sync::LazyLock;

use classfeed_rfc::rfc::ical::RawEvent;

use super::Instructor;
use super::pairwise::parse_instructor_list;
use crate::ingest::name::clean_name;

// A label starts a line when it follows a real line break or an escaped
// `\n`/`\r`; the capture runs to the next real line break.
static INSTRUCTOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)(?:^|\\[nr])[ \t]*Instructor:[ \t]*([^\r\n]*)")
        .expect("valid instructor line regex")
});
static ALTERNATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)(?:^|\\[nr])[ \t]*(?:Profesora?:|Profeso:|Prof\.?:|Docente:)[ \t]*([^\r\n]*)",
    )
    .expect("valid alternate label regex")
});
static TITLE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)").expect("valid title group regex"));

/// One strategy for finding instructor names.
///
/// Sources are tried in order by [`super::InstructorListParser`]; the first
/// one returning a non-empty list wins.
pub trait NameSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Names found in `event`, in reading order. `title` is the event title
    /// as resolved by the normalizer.
    fn names(&self, event: &RawEvent, title: &str) -> Vec<Instructor>;
}

/// A description line introduced by a label such as `Instructor:`.
#[derive(Debug, Clone, Copy)]
pub struct LabelledLine {
    name: &'static str,
    pattern: &'static Regex,
}

impl LabelledLine {
    /// Lines starting with `Instructor:`.
    #[must_use]
    pub fn instructor() -> Self {
        Self {
            name: "instructor-label",
            pattern: &INSTRUCTOR_LINE,
        }
    }

    /// Lines starting with `Profesor:`, `Profesora:`, `Profeso:`, `Prof:`,
    /// `Prof.:` or `Docente:`.
    #[must_use]
    pub fn alternate() -> Self {
        Self {
            name: "alternate-label",
            pattern: &ALTERNATE_LINE,
        }
    }
}

impl NameSource for LabelledLine {
    fn name(&self) -> &'static str {
        self.name
    }

    /// Searches the still-escaped description, so `\,` survives for the
    /// pair parser. Falls back to the decoded text when the decoder did not
    /// keep the escaped form.
    fn names(&self, event: &RawEvent, _title: &str) -> Vec<Instructor> {
        event
            .raw_description
            .as_deref()
            .or(event.description.as_deref())
            .and_then(|description| self.pattern.captures(description))
            .map(|caps| parse_instructor_list(&caps[1]))
            .unwrap_or_default()
    }
}

/// The ORGANIZER address.
#[derive(Debug, Clone, Copy, Default)]
pub struct Organizer;

impl NameSource for Organizer {
    fn name(&self) -> &'static str {
        "organizer"
    }

    fn names(&self, event: &RawEvent, _title: &str) -> Vec<Instructor> {
        event
            .organizer
            .as_deref()
            .map(clean_name)
            .filter(|name| !name.is_empty())
            .map(Instructor::Verbatim)
            .into_iter()
            .collect()
    }
}

/// Every ATTENDEE address, deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Attendees;

impl NameSource for Attendees {
    fn name(&self) -> &'static str {
        "attendees"
    }

    fn names(&self, event: &RawEvent, _title: &str) -> Vec<Instructor> {
        let mut names: Vec<String> = Vec::new();
        for attendee in &event.attendees {
            let name = clean_name(attendee);
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        names.into_iter().map(Instructor::Verbatim).collect()
    }
}

/// A parenthesised name in the title, as in `Physics (Dr. Ruiz)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleParenthetical;

impl NameSource for TitleParenthetical {
    fn name(&self) -> &'static str {
        "title-parenthetical"
    }

    fn names(&self, _event: &RawEvent, title: &str) -> Vec<Instructor> {
        TITLE_GROUP
            .captures_iter(title)
            .map(|caps| caps[1].to_string())
            .find(|inner| inner.chars().any(char::is_alphabetic))
            .map(|inner| clean_name(&inner))
            .filter(|name| !name.is_empty())
            .map(Instructor::Verbatim)
            .into_iter()
            .collect()
    }
}
