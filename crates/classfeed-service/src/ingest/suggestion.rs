//! Projection of class sessions into the items shown for review.

use serde::Serialize;

use classfeed_core::constants::CLASS_SUGGESTION_TYPE;

use super::session::ClassSession;

/// A reviewable class item, serialized in camelCase.
///
/// Dates and times are preformatted (`YYYY-MM-DD`, `HH:MM`) and empty when
/// unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub instructor: String,
    /// First active weekday index (Sunday=0).
    pub day: Option<u8>,
    pub byday: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub date_from: String,
    pub date_to: String,
}

impl Suggestion {
    /// Builds the item for the session at `index`; ids are 1-based.
    #[must_use]
    pub fn from_session(index: usize, prefix: &str, session: &ClassSession) -> Self {
        let time = |t: Option<chrono::NaiveTime>| {
            t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
        };
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
        };

        Self {
            id: format!("{prefix}-{}", index + 1),
            kind: CLASS_SUGGESTION_TYPE.to_string(),
            title: session.title.clone(),
            location: session.room.clone(),
            description: session.description.clone(),
            instructor: session.instructor_display(),
            day: session.weekdays.first(),
            byday: session
                .weekdays
                .codes()
                .into_iter()
                .map(str::to_string)
                .collect(),
            start_time: time(session.start_time),
            end_time: time(session.end_time),
            date_from: date(session.date_from),
            date_to: date(session.date_to),
        }
    }
}

/// Maps sessions to suggestions, numbering them in order.
#[must_use]
pub fn to_suggestions(prefix: &str, sessions: &[ClassSession]) -> Vec<Suggestion> {
    sessions
        .iter()
        .enumerate()
        .map(|(index, session)| Suggestion::from_session(index, prefix, session))
        .collect()
}
