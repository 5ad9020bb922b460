//! Row sources for VCDS logs.
//!
//! A row source hands the decoder an ordered sequence of comma-split rows.
//! File-backed and in-memory sources share the same line splitting, so the
//! same text always produces the same rows regardless of where it came from.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::DecodeError;

/// A single comma-split row
pub type Row = Vec<String>;

/// Field delimiter used by VCDS exports
pub const FIELD_DELIMITER: char = ',';

/// Anything that can produce the rows of a log
pub trait RowSource {
    fn rows(&self) -> Result<Vec<Row>, DecodeError>;
}

/// Split text into rows, dropping line terminators
pub fn split_rows(text: &str) -> Vec<Row> {
    text.lines()
        .map(|line| line.trim_end_matches(['\r', '\n']))
        .map(|line| line.split(FIELD_DELIMITER).map(str::to_string).collect())
        .collect()
}

/// Check that a path names an existing `.csv` file
pub fn is_supported_path(path: &Path) -> bool {
    let has_csv_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".csv"))
        .unwrap_or(false);

    has_csv_name && path.is_file()
}

/// Rows read from a `.csv` file on disk
#[derive(Clone, Debug)]
pub struct FileRowSource {
    path: PathBuf,
}

impl FileRowSource {
    /// Validate the path up front so bad sources fail before any reading
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DecodeError> {
        let path = path.into();
        if !is_supported_path(&path) {
            return Err(DecodeError::UnsupportedSource { path });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for FileRowSource {
    fn rows(&self) -> Result<Vec<Row>, DecodeError> {
        // The file is opened and closed inside read_to_string
        let contents = fs::read_to_string(&self.path)?;
        Ok(split_rows(&contents))
    }
}

/// Rows taken from an in-memory text buffer
#[derive(Clone, Debug)]
pub struct TextRowSource<'a> {
    text: &'a str,
}

impl<'a> TextRowSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl RowSource for TextRowSource<'_> {
    fn rows(&self) -> Result<Vec<Row>, DecodeError> {
        Ok(split_rows(self.text))
    }
}

/// Where a log comes from
#[derive(Clone, Debug)]
pub enum LogSource<'a> {
    Path(PathBuf),
    Text(&'a str),
}

impl RowSource for LogSource<'_> {
    /// Resolve into rows, validating file paths first
    fn rows(&self) -> Result<Vec<Row>, DecodeError> {
        match self {
            LogSource::Path(path) => FileRowSource::open(path.clone())?.rows(),
            LogSource::Text(text) => TextRowSource::new(text).rows(),
        }
    }
}
