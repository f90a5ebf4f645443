//! Flattening of parsed VEVENTs into plain event records.
//!
//! Everything downstream of this module works on [`RawEvent`] and never sees
//! properties, parameters or timezone identifiers.

mod decoder;
mod event;

pub use decoder::decode_events;
pub use event::{EventTime, RawEvent};
