/// Title used when an event has neither a summary nor a description.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Suggestion `type` tag for sessions extracted from a calendar feed.
pub const CLASS_SUGGESTION_TYPE: &str = "class";

pub const DEFAULT_ID_PREFIX: &str = "ics";
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_LOG_LEVEL: &str = "info";
