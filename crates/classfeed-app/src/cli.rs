use std::path::PathBuf;

use clap::Parser;

use classfeed_core::config::IngestConfig;
use classfeed_service::ingest::{ClassSessionExtractor, to_suggestions};

use crate::error::{AppError, AppResult};

/// Extract class sessions from an .ics calendar file and print them as JSON
#[derive(Parser, Debug)]
#[command(name = "classfeed", author, version, about, long_about = None)]
pub struct Cli {
    /// Calendar file to read
    pub file: PathBuf,

    /// Display timezone for local times (overrides ingest.timezone)
    #[arg(long)]
    pub timezone: Option<String>,

    /// Prefix for suggestion ids (overrides ingest.id_prefix)
    #[arg(long)]
    pub id_prefix: Option<String>,

    /// Reject the whole file on the first malformed line
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply(&self, ingest: &mut IngestConfig) {
        if let Some(timezone) = &self.timezone {
            ingest.timezone.clone_from(timezone);
        }
        if let Some(prefix) = &self.id_prefix {
            ingest.id_prefix.clone_from(prefix);
        }
        if self.strict {
            ingest.lenient = false;
        }
    }

    /// ## Summary
    /// Reads the calendar file named on the command line.
    ///
    /// ## Errors
    /// Returns `AppError::Read` if the file cannot be read.
    pub fn read_input(&self) -> AppResult<Vec<u8>> {
        std::fs::read(&self.file).map_err(|source| AppError::Read {
            path: self.file.clone(),
            source,
        })
    }
}

/// ## Summary
/// Runs the extraction pipeline and renders the suggestions as pretty JSON.
///
/// ## Errors
/// Returns an error if the timezone is invalid, the calendar cannot be
/// decoded, or serialization fails.
#[tracing::instrument(skip(input, ingest), fields(input_len = input.len()))]
pub fn render_suggestions(input: &[u8], ingest: &IngestConfig) -> AppResult<String> {
    let extractor = ClassSessionExtractor::from_config(ingest)?;
    let sessions = extractor.extract(input)?;
    let suggestions = to_suggestions(&ingest.id_prefix, &sessions);

    tracing::info!(count = suggestions.len(), "Extracted class suggestions");

    Ok(serde_json::to_string_pretty(&suggestions)?)
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
