//! iCalendar parameter types (RFC 5545 §3.2).

use std::fmt;

/// A single iCalendar property parameter.
///
/// For example, in `ORGANIZER;CN="Doe, Jane":mailto:jane@example.edu` the
/// parameter has name `CN` and value `Doe, Jane`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values. Most parameters have one value, but some
    /// (like MEMBER) can have multiple comma-separated values.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a new parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first (and usually only) value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.values.is_empty() {
            return Ok(());
        }
        write!(f, "=")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if value.contains([':', ';', ',']) {
                write!(f, "\"{value}\"")?;
            } else {
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(name: &str, value: &str) -> Parameter {
        Parameter::with_values(name, vec![value.to_string()])
    }

    #[test]
    fn parameter_name_is_uppercased() {
        let param = single("cn", "Jane");
        assert_eq!(param.name, "CN");
        assert_eq!(param.value(), Some("Jane"));
    }

    #[test]
    fn parameter_display_quotes_separators() {
        assert_eq!(single("CN", "Doe, Jane").to_string(), "CN=\"Doe, Jane\"");
        assert_eq!(single("TZID", "America/Lima").to_string(), "TZID=America/Lima");
    }

    #[test]
    fn parameter_display_multiple_values() {
        let param = Parameter::with_values(
            "ROLE",
            vec!["CHAIR".to_string(), "REQ-PARTICIPANT".to_string()],
        );
        assert_eq!(param.to_string(), "ROLE=CHAIR,REQ-PARTICIPANT");
        assert_eq!(Parameter::with_values("RSVP", Vec::new()).to_string(), "RSVP");
    }
}
