//! Data row decoding.
//!
//! Every row after the header carries one five-column block per measure
//! group. Values are routed to their channel through the [`LabelTable`]
//! column lookup and collected into growable per-channel buffers.

use super::classify::is_binary;
use super::error::DecodeError;
use super::header::{HeaderPhase, LabelTable};
use super::types::{Channel, GroupData, Value};

/// Decode one raw field.
///
/// Returns `None` for blank fields. Bit patterns keep the original field
/// text. Anything else must parse as a float once the surrounding spaces are
/// trimmed; spaces inside a number are an error.
pub fn parse_value(raw: &str) -> Option<Result<Value, std::num::ParseFloatError>> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    if is_binary(&compact) {
        Some(Ok(Value::Binary(raw.to_string())))
    } else {
        Some(raw.trim().parse::<f64>().map(Value::Numeric))
    }
}

/// Growable value buffers, one per labelled column
#[derive(Debug)]
pub struct ChannelBuffers {
    groups: Vec<Vec<Vec<Value>>>,
}

impl ChannelBuffers {
    /// Allocate an empty buffer for every (group, label) in the table
    pub fn for_table(table: &LabelTable) -> Self {
        let groups = table
            .groups()
            .iter()
            .map(|g| vec![Vec::new(); g.labels.len()])
            .collect();
        Self { groups }
    }

    fn push(&mut self, group: usize, channel: usize, value: Value) {
        self.groups[group][channel].push(value);
    }

    /// Freeze every buffer into a fixed-length channel
    pub fn freeze(self, table: &LabelTable) -> Vec<GroupData> {
        table
            .groups()
            .iter()
            .zip(self.groups)
            .map(|(group, buffers)| {
                let channels = group
                    .labels
                    .iter()
                    .zip(buffers)
                    .map(|(label, values)| Channel::new(label.clone(), values.into_boxed_slice()))
                    .collect();
                GroupData::new(group.id.clone(), channels)
            })
            .collect()
    }
}

/// Routes data-row fields into channel buffers
#[derive(Debug)]
pub struct DataRowParser<'a> {
    table: &'a LabelTable,
}

impl<'a> DataRowParser<'a> {
    pub fn new(table: &'a LabelTable) -> Self {
        Self { table }
    }

    /// Decode one data row; `row_index` is the row's position in the source
    pub fn parse_row(
        &self,
        row_index: usize,
        row: &[String],
        buffers: &mut ChannelBuffers,
    ) -> Result<(), DecodeError> {
        let required = self.table.required_fields();
        if row.len() < required {
            return Err(DecodeError::malformed(
                row_index,
                HeaderPhase::ReadingData,
                required,
                row.len(),
            ));
        }

        for slot in self.table.columns() {
            let raw = &row[slot.column];
            match parse_value(raw) {
                None => continue,
                Some(Ok(value)) => buffers.push(slot.group, slot.channel, value),
                Some(Err(_)) => {
                    return Err(DecodeError::NumericConversion {
                        row: row_index,
                        column: slot.column,
                        token: raw.clone(),
                    })
                }
            }
        }
        Ok(())
    }
}
