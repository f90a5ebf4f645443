//! Class-session extraction from calendar feeds.
//!
//! Turns an uploaded `.ics` document into one [`ingest::ClassSession`] per
//! VEVENT, and projects sessions into the suggestion items shown to users.

pub mod error;
pub mod ingest;
