//! Integration tests for end-to-end functionality
//!
//! Tests for:
//! - Complete file loading cycles
//! - Data integrity of decoded logs
//! - Merged table output
