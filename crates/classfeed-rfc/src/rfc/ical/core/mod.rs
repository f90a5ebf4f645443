//! iCalendar core models (RFC 5545).
//!
//! Components keep every property in document order together with its raw
//! value, so consumers can fall back to the unparsed text when a typed value
//! is not trusted.

mod component;
mod datetime;
mod parameter;
mod property;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm};
pub use parameter::Parameter;
pub use property::{ContentLine, Property};
pub use value::Value;
