pub mod builder;
pub mod classify;
pub mod data;
pub mod error;
pub mod header;
pub mod source;
pub mod types;
pub mod vcds;

pub use builder::{decode, LogBuilder};
pub use error::DecodeError;
pub use source::{FileRowSource, LogSource, RowSource, TextRowSource};
pub use types::{Channel, GroupData, LogRecord, MergedTable, Parseable, Value, VcdsMeta};
pub use vcds::Vcds;
