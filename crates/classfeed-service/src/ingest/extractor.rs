//! Pipeline entry point: bytes in, class sessions out.

use chrono_tz::Tz;

use classfeed_core::config::IngestConfig;
use classfeed_rfc::rfc::ical::{RawEvent, Strictness, decode_events};

use super::instructor::InstructorListParser;
use super::session::{ClassSession, assemble};
use crate::error::ServiceResult;

/// Source of decoded events.
pub trait CalendarDecoder {
    /// ## Summary
    /// Decodes a calendar document into its events, in document order.
    ///
    /// ## Errors
    /// Returns `ServiceError::Decode` if the document cannot be decoded.
    fn decode(&self, input: &str) -> ServiceResult<Vec<RawEvent>>;
}

/// [`CalendarDecoder`] backed by the workspace iCalendar parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcalDecoder {
    strictness: Strictness,
}

impl IcalDecoder {
    #[must_use]
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }
}

impl CalendarDecoder for IcalDecoder {
    fn decode(&self, input: &str) -> ServiceResult<Vec<RawEvent>> {
        Ok(decode_events(input, self.strictness)?)
    }
}

/// Decodes a calendar and assembles one [`ClassSession`] per event.
#[derive(Debug)]
pub struct ClassSessionExtractor<D = IcalDecoder> {
    decoder: D,
    display_tz: Tz,
    parser: InstructorListParser,
}

impl ClassSessionExtractor<IcalDecoder> {
    /// ## Summary
    /// Builds an extractor from the `ingest` configuration section.
    ///
    /// ## Errors
    /// Returns an error if the configured timezone is not a known zone.
    pub fn from_config(config: &IngestConfig) -> ServiceResult<Self> {
        let strictness = if config.lenient {
            Strictness::Lenient
        } else {
            Strictness::Strict
        };
        Ok(Self::new(
            IcalDecoder::new(strictness),
            config.display_timezone()?,
        ))
    }
}

impl<D: CalendarDecoder> ClassSessionExtractor<D> {
    #[must_use]
    pub fn new(decoder: D, display_tz: Tz) -> Self {
        Self {
            decoder,
            display_tz,
            parser: InstructorListParser::default(),
        }
    }

    /// Replaces the instructor parser.
    #[must_use]
    pub fn with_parser(mut self, parser: InstructorListParser) -> Self {
        self.parser = parser;
        self
    }

    /// ## Summary
    /// Extracts class sessions from an uploaded calendar file.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, and a leading byte
    /// order mark is ignored. Sessions come out in document order.
    ///
    /// ## Errors
    /// Returns `ServiceError::Decode` if the calendar cannot be decoded. No
    /// per-event problem is an error.
    #[tracing::instrument(skip_all, fields(input_len = input.len(), display_tz = %self.display_tz))]
    pub fn extract(&self, input: &[u8]) -> ServiceResult<Vec<ClassSession>> {
        let text = String::from_utf8_lossy(input);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text[..]);

        let events = self.decoder.decode(text)?;
        tracing::debug!(count = events.len(), "Assembling class sessions");

        Ok(events
            .iter()
            .map(|event| assemble(event, self.display_tz, &self.parser))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;

    struct FixedDecoder(Vec<RawEvent>);

    impl CalendarDecoder for FixedDecoder {
        fn decode(&self, _input: &str) -> ServiceResult<Vec<RawEvent>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn custom_decoder_keeps_order() {
        let events = ["Uno", "Dos", "Tres"]
            .into_iter()
            .map(|title| RawEvent {
                summary: Some(title.to_string()),
                ..RawEvent::default()
            })
            .collect();
        let extractor = ClassSessionExtractor::new(FixedDecoder(events), Tz::UTC);

        let titles: Vec<String> = extractor
            .extract(b"ignored")
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Uno", "Dos", "Tres"]);
    }

    #[test]
    fn bom_and_invalid_utf8_are_tolerated() {
        let input = b"\xEF\xBB\xBFBEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:Qu\xEDmica\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

        let extractor = ClassSessionExtractor::new(IcalDecoder::default(), Tz::UTC);
        let sessions = extractor.extract(input).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].title, "Qu\u{fffd}mica");
    }

    #[test]
    fn decode_failure_is_reported() {
        let extractor = ClassSessionExtractor::new(IcalDecoder::default(), Tz::UTC);
        let err = extractor.extract(b"not a calendar").unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(err.to_string().starts_with("unable to decode calendar document"));
    }

    #[test]
    fn from_config_validates_timezone() {
        let mut config = IngestConfig {
            timezone: "America/Lima".to_string(),
            id_prefix: "ics".to_string(),
            lenient: false,
        };
        assert!(ClassSessionExtractor::from_config(&config).is_ok());

        config.timezone = "Mars/Olympus".to_string();
        let err = ClassSessionExtractor::from_config(&config).unwrap_err();
        assert!(matches!(err, ServiceError::CoreError(_)));
    }
}
