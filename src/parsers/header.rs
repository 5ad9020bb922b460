//! VCDS header interpretation.
//!
//! The first seven rows of an export are positional:
//!
//! | Row | Content |
//! |-----|---------|
//! | 0 | date/time fields (0-4), optional tool version (5) and data version (6) |
//! | 1 | controller name (0), engine description (2) |
//! | 2 | unused |
//! | 3 | measure-group identifiers |
//! | 4 | first label part per column |
//! | 5 | second label part per column |
//! | 6 | unit suffix per column |
//!
//! Rows are fed one at a time through [`HeaderParser::feed`], which walks the
//! [`HeaderPhase`] machine and hands back the resolved [`LabelTable`] once the
//! units row has been consumed.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use strum::{AsRefStr, Display};

use super::error::DecodeError;
use super::types::VcdsMeta;

/// Number of channels in one measure group block
pub const MEASURE_GROUP_SIZE: usize = 5;

/// Number of header rows preceding the data
pub const HEADER_ROWS: usize = 7;

/// First column of the first measure group block (column 0 is reserved)
pub const FIRST_DATA_COLUMN: usize = 1;

static GROUP_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("Failed to compile regex"));

/// Which row the header parser expects next
#[derive(AsRefStr, Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum HeaderPhase {
    ExpectTimestamp,
    ExpectControllerEngine,
    ExpectUnused,
    ExpectMeasureGroups,
    ExpectLabelPart1,
    ExpectLabelPart2,
    ExpectUnits,
    ReadingData,
}

impl HeaderPhase {
    pub fn next(self) -> Self {
        match self {
            HeaderPhase::ExpectTimestamp => HeaderPhase::ExpectControllerEngine,
            HeaderPhase::ExpectControllerEngine => HeaderPhase::ExpectUnused,
            HeaderPhase::ExpectUnused => HeaderPhase::ExpectMeasureGroups,
            HeaderPhase::ExpectMeasureGroups => HeaderPhase::ExpectLabelPart1,
            HeaderPhase::ExpectLabelPart1 => HeaderPhase::ExpectLabelPart2,
            HeaderPhase::ExpectLabelPart2 => HeaderPhase::ExpectUnits,
            HeaderPhase::ExpectUnits | HeaderPhase::ReadingData => HeaderPhase::ReadingData,
        }
    }

    /// Header row index handled by this phase
    pub fn row_index(self) -> Option<usize> {
        match self {
            HeaderPhase::ExpectTimestamp => Some(0),
            HeaderPhase::ExpectControllerEngine => Some(1),
            HeaderPhase::ExpectUnused => Some(2),
            HeaderPhase::ExpectMeasureGroups => Some(3),
            HeaderPhase::ExpectLabelPart1 => Some(4),
            HeaderPhase::ExpectLabelPart2 => Some(5),
            HeaderPhase::ExpectUnits => Some(6),
            HeaderPhase::ReadingData => None,
        }
    }
}

/// Resolved labels of one measure group
#[derive(Clone, Debug, PartialEq)]
pub struct GroupLabels {
    pub id: String,
    pub labels: Vec<String>,
}

/// Where a data column's values are stored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSlot {
    pub column: usize,
    pub group: usize,
    pub channel: usize,
}

/// Group -> label mapping plus the column lookup used for data rows
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTable {
    groups: Vec<GroupLabels>,
    columns: Vec<ColumnSlot>,
    required_fields: usize,
}

impl LabelTable {
    /// Assign resolved labels to measure groups in blocks of five columns.
    ///
    /// Columns with an empty label get no storage. A group id that appears
    /// more than once shares one label list.
    pub fn build(measure_groups: &[String], labels: &[String]) -> Self {
        let mut groups: Vec<GroupLabels> = Vec::new();
        let mut columns = Vec::new();

        for (block, id) in measure_groups.iter().enumerate() {
            let group = match groups.iter().position(|g| g.id == *id) {
                Some(existing) => existing,
                None => {
                    groups.push(GroupLabels {
                        id: id.clone(),
                        labels: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let start = FIRST_DATA_COLUMN + block * MEASURE_GROUP_SIZE;
            for column in start..start + MEASURE_GROUP_SIZE {
                let Some(label) = labels.get(column).filter(|l| !l.is_empty()) else {
                    continue;
                };
                let entry = &mut groups[group].labels;
                entry.push(label.clone());
                columns.push(ColumnSlot {
                    column,
                    group,
                    channel: entry.len() - 1,
                });
            }
        }

        Self {
            groups,
            columns,
            required_fields: block_span(measure_groups.len()),
        }
    }

    pub fn groups(&self) -> &[GroupLabels] {
        &self.groups
    }

    /// Labelled columns in data-row order
    pub fn columns(&self) -> &[ColumnSlot] {
        &self.columns
    }

    /// Minimum number of fields a data row must have
    pub fn required_fields(&self) -> usize {
        self.required_fields
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.labels.iter().map(String::as_str))
    }
}

/// Columns covered by `groups` measure-group blocks, including column 0
pub fn block_span(groups: usize) -> usize {
    FIRST_DATA_COLUMN + groups * MEASURE_GROUP_SIZE
}

/// Cut the time field at its `-` suffix and keep only `H:M:S`
pub fn normalize_time(field: &str) -> String {
    let time = field.split('-').next().unwrap_or_default();
    time.split(':').take(3).collect::<Vec<_>>().join(":")
}

/// Keep the row-3 fields that are measure-group identifiers
pub fn parse_measure_groups(row: &[String]) -> Vec<String> {
    row.iter()
        .map(|field| field.replace('\'', "").trim().to_string())
        .filter(|field| GROUP_ID.is_match(field))
        .collect()
}

/// Append a unit to a label.
///
/// Time columns and empty labels take the unit verbatim, everything else
/// gets a bracketed, trimmed suffix.
pub fn apply_unit(label: &str, unit: &str) -> String {
    if label.is_empty() || label.to_uppercase().contains("TIME") {
        format!("{}{}", label, unit)
    } else {
        format!("{} [{}]", label, unit.trim())
    }
}

/// Rename repeated labels to `"<label> (<n>)"` in column order.
///
/// Empty labels are left alone. Renaming repeats until no collisions remain,
/// so a generated name that matches an existing label is resolved too.
pub fn resolve_duplicate_labels(labels: &mut [String]) {
    loop {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for label in labels.iter().filter(|l| !l.is_empty()) {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
        if counts.values().all(|&n| n == 1) {
            return;
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for label in labels.iter_mut() {
            if counts.get(label.as_str()).is_some_and(|&n| n > 1) {
                let occurrence = seen.entry(label.clone()).or_insert(0);
                *occurrence += 1;
                *label = format!("{} ({})", label, occurrence);
            }
        }
    }
}

fn require(
    row: &[String],
    row_index: usize,
    phase: HeaderPhase,
    required: usize,
) -> Result<(), DecodeError> {
    if row.len() < required {
        return Err(DecodeError::malformed(row_index, phase, required, row.len()));
    }
    Ok(())
}

/// Stateful parser for the seven header rows
#[derive(Debug)]
pub struct HeaderParser {
    phase: HeaderPhase,
    meta: VcdsMeta,
    measure_groups: Vec<String>,
    labels: Vec<String>,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderParser {
    pub fn new() -> Self {
        Self {
            phase: HeaderPhase::ExpectTimestamp,
            meta: VcdsMeta::default(),
            measure_groups: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn phase(&self) -> HeaderPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == HeaderPhase::ReadingData
    }

    pub fn meta(&self) -> &VcdsMeta {
        &self.meta
    }

    pub fn measure_groups(&self) -> &[String] {
        &self.measure_groups
    }

    /// Consume the next header row.
    ///
    /// Returns the label table once the units row has been processed.
    pub fn feed(&mut self, row: &[String]) -> Result<Option<LabelTable>, DecodeError> {
        let phase = self.phase;
        let row_index = phase.row_index().unwrap_or(HEADER_ROWS);
        tracing::debug!("Header row {} ({})", row_index, phase);

        let table = match phase {
            HeaderPhase::ExpectTimestamp => {
                self.timestamp_row(row, row_index)?;
                None
            }
            HeaderPhase::ExpectControllerEngine => {
                self.controller_engine_row(row, row_index)?;
                None
            }
            HeaderPhase::ExpectUnused => None,
            HeaderPhase::ExpectMeasureGroups => {
                self.measure_groups = parse_measure_groups(row);
                None
            }
            HeaderPhase::ExpectLabelPart1 => {
                require(row, row_index, phase, block_span(self.measure_groups.len()))?;
                self.labels = row.to_vec();
                None
            }
            HeaderPhase::ExpectLabelPart2 => {
                require(row, row_index, phase, self.labels.len())?;
                for (label, part) in self.labels.iter_mut().zip(row) {
                    *label = format!("{} {}", label, part).trim().to_string();
                }
                None
            }
            HeaderPhase::ExpectUnits => {
                require(row, row_index, phase, self.labels.len())?;
                Some(self.units_row(row))
            }
            HeaderPhase::ReadingData => None,
        };

        self.phase = phase.next();
        Ok(table)
    }

    /// Hand over the collected metadata and group identifiers
    pub fn into_parts(self) -> (VcdsMeta, Vec<String>) {
        (self.meta, self.measure_groups)
    }

    fn timestamp_row(&mut self, row: &[String], row_index: usize) -> Result<(), DecodeError> {
        require(row, row_index, HeaderPhase::ExpectTimestamp, 5)?;

        let time = normalize_time(&row[4]);
        let mut parts: Vec<&str> = row[..4].iter().map(String::as_str).collect();
        parts.push(&time);
        self.meta.timestamp = parts.join(" ");

        if row.len() == 7 {
            self.meta.tool_version = row[5].trim().to_string();
            self.meta.tool_data_version = row[6].trim().to_string();
        }
        Ok(())
    }

    fn controller_engine_row(&mut self, row: &[String], row_index: usize) -> Result<(), DecodeError> {
        require(row, row_index, HeaderPhase::ExpectControllerEngine, 3)?;

        self.meta.controller_name = row[0].trim().to_string();
        self.meta.engine_type = row[2].split_whitespace().collect::<Vec<_>>().join(" ");
        Ok(())
    }

    fn units_row(&mut self, row: &[String]) -> LabelTable {
        for (label, unit) in self.labels.iter_mut().zip(row) {
            *label = apply_unit(label, unit);
        }
        resolve_duplicate_labels(&mut self.labels);

        let table = LabelTable::build(&self.measure_groups, &self.labels);
        tracing::debug!(
            "Resolved {} labels across {} measure groups",
            table.columns().len(),
            table.groups().len()
        );
        table
    }
}
