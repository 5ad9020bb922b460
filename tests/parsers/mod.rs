//! Parser integration tests
//!
//! - Header interpretation and label resolution
//! - Value classification in data rows
//! - Row sources (file and in-memory)
//! - Edge cases and error handling
