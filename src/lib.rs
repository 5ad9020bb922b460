//! vaglog - A decoder for VCDS measuring-block CSV logs
//!
//! This library turns the positional CSV export of a VCDS diagnostic session
//! into a strongly-typed, group-indexed time series.
//!
//! ## Module Structure
//!
//! - [`parsers`] - VCDS log decoding
//!   - `source` - File and in-memory row sources
//!   - `classify` - Bit-pattern vs numeric token classification
//!   - `header` - Header phase machine and label resolution
//!   - `data` - Data row decoding into channel buffers
//!   - `builder` - Per-parse state and finalization
//!   - `vcds` - Parser entry points
//! - [`settings`] - User settings persistence for the command line tool

pub mod parsers;
pub mod settings;
