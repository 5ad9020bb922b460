//! VCDS measuring-block log parser.
//!
//! VCDS exports measuring blocks as a positional CSV file: seven header rows
//! describing the session and the channels, followed by one row per sample
//! where every measure group occupies a fixed block of five columns.

use std::path::Path;

use super::builder::decode;
use super::error::DecodeError;
use super::source::{FileRowSource, LogSource, TextRowSource};
use super::types::{LogRecord, Parseable};

/// VCDS log file parser
pub struct Vcds;

impl Vcds {
    /// Parse a `.csv` log from disk
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<LogRecord, DecodeError> {
        let source = FileRowSource::open(path.as_ref())?;
        tracing::debug!("Reading VCDS log from {:?}", source.path());
        decode(&source)
    }

    /// Parse from either a path or an in-memory buffer
    pub fn parse_source(&self, source: &LogSource<'_>) -> Result<LogRecord, DecodeError> {
        decode(source)
    }
}

impl Parseable for Vcds {
    fn parse(&self, file_contents: &str) -> Result<LogRecord, DecodeError> {
        decode(&TextRowSource::new(file_contents))
    }
}
