//! Parse-state accumulation for a single decode call.

use super::data::{ChannelBuffers, DataRowParser};
use super::error::DecodeError;
use super::header::{HeaderParser, LabelTable, HEADER_ROWS};
use super::source::RowSource;
use super::types::LogRecord;

/// Mutable state for one decode call, frozen into a [`LogRecord`] by
/// [`LogBuilder::finish`]
#[derive(Debug, Default)]
pub struct LogBuilder {
    header: HeaderParser,
    body: Option<(LabelTable, ChannelBuffers)>,
    rows_seen: usize,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    /// Dispatch the next row to the header parser or the data parser
    pub fn push_row(&mut self, row: &[String]) -> Result<(), DecodeError> {
        let row_index = self.rows_seen;

        if let Some((table, buffers)) = self.body.as_mut() {
            DataRowParser::new(table).parse_row(row_index, row, buffers)?;
        } else if let Some(table) = self.header.feed(row)? {
            let buffers = ChannelBuffers::for_table(&table);
            self.body = Some((table, buffers));
        }

        self.rows_seen += 1;
        Ok(())
    }

    /// Freeze the accumulated state into an immutable record
    pub fn finish(self) -> Result<LogRecord, DecodeError> {
        let Some((table, buffers)) = self.body else {
            return Err(DecodeError::IncompleteHeader {
                rows: self.rows_seen,
            });
        };

        let data_rows = self.rows_seen - HEADER_ROWS;
        let data = buffers.freeze(&table);
        let (meta, measure_groups) = self.header.into_parts();

        tracing::info!(
            "Parsed VCDS log: {} measure groups, {} channels, {} data rows",
            measure_groups.len(),
            table.columns().len(),
            data_rows
        );

        Ok(LogRecord::new(meta, measure_groups, data, data_rows))
    }
}

/// Decode every row of a source into a [`LogRecord`]
pub fn decode(source: &impl RowSource) -> Result<LogRecord, DecodeError> {
    let mut builder = LogBuilder::new();
    for row in source.rows()? {
        builder.push_row(&row)?;
    }
    builder.finish()
}
