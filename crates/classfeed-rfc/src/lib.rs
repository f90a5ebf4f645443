//! RFC 5545 support for calendar-feed ingestion.
//!
//! Parses iCalendar documents and decodes their VEVENTs into the flat
//! `RawEvent` records the extraction pipeline consumes.

pub mod error;
pub mod rfc;
