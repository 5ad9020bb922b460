use serde::ser::{SerializeMap, SerializeStruct};
use serde::Serialize;

use super::error::DecodeError;

/// A single sampled value from a data row
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Numeric reading
    Numeric(f64),
    /// Raw bit pattern, kept exactly as it appeared in the field
    Binary(String),
}

impl Value {
    /// Numeric reading, if this is one
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            Value::Binary(_) => None,
        }
    }

    /// Bit-pattern token, if this is one
    #[inline]
    pub fn as_binary(&self) -> Option<&str> {
        match self {
            Value::Numeric(_) => None,
            Value::Binary(token) => Some(token),
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Value::Binary(_))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Numeric(v) => serializer.serialize_f64(*v),
            Value::Binary(token) => serializer.serialize_str(token),
        }
    }
}

/// One labelled channel and its samples
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    label: String,
    values: Box<[Value]>,
}

impl Channel {
    pub(crate) fn new(label: String, values: Box<[Value]>) -> Self {
        Self { label, values }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric readings only, skipping bit patterns
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Value::as_f64).collect()
    }
}

/// Channels belonging to one measure group
#[derive(Clone, Debug, PartialEq)]
pub struct GroupData {
    id: String,
    channels: Vec<Channel>,
}

impl GroupData {
    pub(crate) fn new(id: String, channels: Vec<Channel>) -> Self {
        Self { id, channels }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, label: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.label == label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.label.as_str())
    }
}

impl Serialize for GroupData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.channels.len()))?;
        for channel in &self.channels {
            map.serialize_entry(&channel.label, &channel.values)?;
        }
        map.end()
    }
}

/// Log header metadata
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VcdsMeta {
    pub timestamp: String,
    pub tool_version: String,
    pub tool_data_version: String,
    pub controller_name: String,
    pub engine_type: String,
}

/// Decoded VCDS log. Built once per parse and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    meta: VcdsMeta,
    measure_groups: Vec<String>,
    data: Vec<GroupData>,
    data_rows: usize,
}

impl LogRecord {
    pub(crate) fn new(
        meta: VcdsMeta,
        measure_groups: Vec<String>,
        data: Vec<GroupData>,
        data_rows: usize,
    ) -> Self {
        Self {
            meta,
            measure_groups,
            data,
            data_rows,
        }
    }

    pub fn meta(&self) -> &VcdsMeta {
        &self.meta
    }

    pub fn timestamp(&self) -> &str {
        &self.meta.timestamp
    }

    pub fn tool_version(&self) -> &str {
        &self.meta.tool_version
    }

    pub fn tool_data_version(&self) -> &str {
        &self.meta.tool_data_version
    }

    pub fn controller_name(&self) -> &str {
        &self.meta.controller_name
    }

    pub fn engine_type(&self) -> &str {
        &self.meta.engine_type
    }

    /// Group identifiers in header order
    pub fn measure_groups(&self) -> &[String] {
        &self.measure_groups
    }

    /// Per-group channel data in header order
    pub fn data(&self) -> &[GroupData] {
        &self.data
    }

    /// Number of data rows that followed the header
    pub fn data_row_count(&self) -> usize {
        self.data_rows
    }

    pub fn group(&self, id: &str) -> Option<&GroupData> {
        self.data.iter().find(|g| g.id == id)
    }

    /// Find a channel by label in any group (labels are globally unique)
    pub fn channel(&self, label: &str) -> Option<&Channel> {
        self.data.iter().find_map(|g| g.channel(label))
    }

    pub fn channel_count(&self) -> usize {
        self.data.iter().map(|g| g.channels.len()).sum()
    }

    /// Merge every group into one flat label -> values table
    pub fn merged(&self, include_index: bool) -> MergedTable<'_> {
        let channels: Vec<&Channel> = self.data.iter().flat_map(|g| &g.channels).collect();
        let index = include_index.then(|| (1..=self.data_rows).collect());
        MergedTable { index, channels }
    }
}

impl Serialize for LogRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("LogRecord", 7)?;
        state.serialize_field("timestamp", &self.meta.timestamp)?;
        state.serialize_field("tool_version", &self.meta.tool_version)?;
        state.serialize_field("tool_data_version", &self.meta.tool_data_version)?;
        state.serialize_field("controller_name", &self.meta.controller_name)?;
        state.serialize_field("engine_type", &self.meta.engine_type)?;
        state.serialize_field("measure_groups", &self.measure_groups)?;
        state.serialize_field("data", &GroupsMap(&self.data))?;
        state.end()
    }
}

struct GroupsMap<'a>(&'a [GroupData]);

impl Serialize for GroupsMap<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for group in self.0 {
            map.serialize_entry(&group.id, group)?;
        }
        map.end()
    }
}

/// Label used for the synthesized row index column
pub const INDEX_LABEL: &str = "Index";

/// Flat view over every channel of a record
#[derive(Clone, Debug)]
pub struct MergedTable<'a> {
    index: Option<Vec<usize>>,
    channels: Vec<&'a Channel>,
}

impl<'a> MergedTable<'a> {
    /// 1-based row numbers, when requested
    pub fn index(&self) -> Option<&[usize]> {
        self.index.as_deref()
    }

    pub fn channels(&self) -> &[&'a Channel] {
        &self.channels
    }

    pub fn labels(&self) -> Vec<&'a str> {
        self.channels.iter().copied().map(Channel::label).collect()
    }

    pub fn get(&self, label: &str) -> Option<&'a [Value]> {
        self.channels
            .iter()
            .copied()
            .find(|c| c.label == label)
            .map(Channel::values)
    }

    /// Number of columns, counting the index column
    pub fn width(&self) -> usize {
        self.channels.len() + usize::from(self.index.is_some())
    }

    /// Row count: the index length when present, else the longest column
    pub fn height(&self) -> usize {
        let longest = self.channels.iter().map(|c| c.len()).max().unwrap_or(0);
        self.index.as_ref().map_or(longest, |index| index.len().max(longest))
    }
}

impl Serialize for MergedTable<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.width()))?;
        if let Some(index) = &self.index {
            map.serialize_entry(INDEX_LABEL, index)?;
        }
        for channel in &self.channels {
            map.serialize_entry(&channel.label, &channel.values)?;
        }
        map.end()
    }
}

/// Trait for log file parsers
pub trait Parseable {
    fn parse(&self, data: &str) -> Result<LogRecord, DecodeError>;
}
