//! iCalendar RFC 5545 implementation.
//!
//! - `core`: Type definitions for iCalendar structures
//! - `parse`: Parsers for iCalendar content
//! - `expand`: Timezone resolution for DATE-TIME values
//! - `decode`: Flattening of VEVENTs into `RawEvent` records
//!
//! ## Example
//!
//! ```rust
//! use classfeed_rfc::rfc::ical::{Strictness, decode_events};
//!
//! let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Algebra\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let events = decode_events(input, Strictness::Lenient).unwrap();
//! assert_eq!(events[0].summary.as_deref(), Some("Algebra"));
//! ```

pub mod core;
pub mod decode;
pub mod expand;
pub mod parse;

#[cfg(test)]
mod tests;

// Re-export commonly used items at module level
pub use core::{Component, ComponentKind, ICalendar, Parameter, Property};
pub use decode::{EventTime, RawEvent, decode_events};
pub use parse::{ParseError, ParseResult, Strictness, parse, parse_with};
