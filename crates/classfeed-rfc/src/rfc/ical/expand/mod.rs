//! Resolution of zoned DATE-TIME values to absolute instants.

mod timezone;

pub use timezone::{ConversionError, TimeZoneResolver, to_utc};
