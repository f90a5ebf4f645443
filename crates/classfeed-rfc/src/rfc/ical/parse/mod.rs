//! iCalendar parsing primitives (RFC 5545).
//!
//! - Lexer: line unfolding and content line tokenization
//! - Values: value type parsing (DATE, DATE-TIME, DURATION, TEXT, ...)
//! - Parser: full document parsing into components

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines};
pub use parser::{Strictness, parse, parse_with};
pub use values::{
    parse_date, parse_datetime, parse_duration, parse_integer, parse_time, unescape_text,
};
