//! Core module tests for non-parser functionality
//!
//! Tests for:
//! - Value classification
//! - User settings persistence

pub mod settings_tests;
