//! Instructor name extraction.
//!
//! - `pairwise`: the escaped-comma pair parser for labelled lines
//! - `source`: the [`NameSource`] strategies, tried in order

mod pairwise;
mod source;

use classfeed_rfc::rfc::ical::RawEvent;

pub use pairwise::parse_instructor_list;
pub use source::{Attendees, LabelledLine, NameSource, Organizer, TitleParenthetical};

/// A formatted instructor name built from a surnames/given-names pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorEntry {
    /// Given names, parentheticals removed. Never empty.
    pub first_name_part: String,
    /// Surnames in display order.
    pub surname_display: String,
}

/// One extracted instructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instructor {
    Formatted(InstructorEntry),
    /// A name taken as found (after cleaning), when no pair structure exists.
    Verbatim(String),
}

impl Instructor {
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Formatted(entry) => format!("{} {}", entry.first_name_part, entry.surname_display)
                .trim()
                .to_string(),
            Self::Verbatim(name) => name.clone(),
        }
    }
}

/// Runs the name sources in order and keeps the first non-empty result.
pub struct InstructorListParser {
    sources: Vec<Box<dyn NameSource>>,
}

impl InstructorListParser {
    /// Parser with a custom ordered list of sources.
    #[must_use]
    pub fn with_sources(sources: Vec<Box<dyn NameSource>>) -> Self {
        Self { sources }
    }

    /// ## Summary
    /// Extracts instructors for `event`. Returns an empty list when no source
    /// applies.
    #[must_use]
    pub fn parse(&self, event: &RawEvent, title: &str) -> Vec<Instructor> {
        for source in &self.sources {
            let names = source.names(event, title);
            if !names.is_empty() {
                tracing::debug!(source = source.name(), count = names.len(), "Found instructors");
                return names;
            }
        }
        tracing::debug!("No instructor found");
        Vec::new()
    }

    /// Joins display names with `", "`.
    #[must_use]
    pub fn display(instructors: &[Instructor]) -> String {
        instructors
            .iter()
            .map(Instructor::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for InstructorListParser {
    fn default() -> Self {
        Self::with_sources(vec![
            Box::new(LabelledLine::instructor()),
            Box::new(LabelledLine::alternate()),
            Box::new(Organizer),
            Box::new(Attendees),
            Box::new(TitleParenthetical),
        ])
    }
}

impl std::fmt::Debug for InstructorListParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.sources.iter().map(|source| source.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn labelled_line_wins_over_organizer() {
        let event = RawEvent {
            description: Some("Instructor: TORRES \\, CARLOS \\n".to_string()),
            organizer: Some("CN=Secretaria:mailto:sec@uni.edu".to_string()),
            ..RawEvent::default()
        };
        let parser = InstructorListParser::default();
        let found = parser.parse(&event, "Quimica");
        assert_eq!(InstructorListParser::display(&found), "CARLOS TORRES");
    }

    #[test_log::test]
    fn falls_through_to_title() {
        let event = RawEvent {
            description: Some("Instructor: \\n".to_string()),
            attendees: vec!["mailto:room-b204@uni.edu".to_string()],
            ..RawEvent::default()
        };
        let parser = InstructorListParser::default();
        let found = parser.parse(&event, "Seminar (Prof. Ana Ruiz)");
        assert_eq!(found, vec![Instructor::Verbatim("Prof. Ana Ruiz".to_string())]);
    }

    #[test]
    fn nothing_found() {
        let parser = InstructorListParser::default();
        assert!(parser.parse(&RawEvent::default(), "Untitled Event").is_empty());
    }

    #[test]
    fn custom_source_order() {
        let event = RawEvent {
            description: Some("Instructor: RUIZ \\, ANA".to_string()),
            organizer: Some("CN=Luis Vega:mailto:lv@uni.edu".to_string()),
            ..RawEvent::default()
        };
        let parser = InstructorListParser::with_sources(vec![
            Box::new(Organizer),
            Box::new(LabelledLine::instructor()),
        ]);
        assert_eq!(
            InstructorListParser::display(&parser.parse(&event, "")),
            "Luis Vega"
        );
        assert_eq!(format!("{parser:?}"), "[\"organizer\", \"instructor-label\"]");
    }

    #[test]
    fn display_joins_with_comma() {
        let list = vec![
            Instructor::Formatted(InstructorEntry {
                first_name_part: "MARIA".to_string(),
                surname_display: "LOPEZ GARCIA".to_string(),
            }),
            Instructor::Verbatim("CARLOS TORRES".to_string()),
        ];
        assert_eq!(
            InstructorListParser::display(&list),
            "MARIA LOPEZ GARCIA, CARLOS TORRES"
        );
    }
}
