//! Calendar ingestion pipeline.
//!
//! ## Module Organization
//!
//! - `event`: `EventNormalizer`, title/room/local time resolution
//! - `recurrence`: BYDAY/UNTIL extraction from the raw RRULE line
//! - `instructor`: instructor name sources and the pairwise list parser
//! - `name`: shared name cleaning
//! - `session`: `ClassSession` assembly
//! - `suggestion`: the serialized review items
//! - `extractor`: decoder seam and the `ClassSessionExtractor` facade
//! - `weekday`: `WeekdaySet`

pub mod event;
pub mod extractor;
pub mod instructor;
pub mod name;
pub mod recurrence;
pub mod session;
pub mod suggestion;
pub mod weekday;

pub use event::{EventNormalizer, NormalizedEvent, extract_room};
pub use extractor::{CalendarDecoder, ClassSessionExtractor, IcalDecoder};
pub use instructor::{Instructor, InstructorEntry, InstructorListParser, NameSource};
pub use name::clean_name;
pub use recurrence::{ParsedRecurrence, extract_recurrence};
pub use session::{ClassSession, assemble};
pub use suggestion::{Suggestion, to_suggestions};
pub use weekday::WeekdaySet;
