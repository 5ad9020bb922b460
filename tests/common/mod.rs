//! Common test utilities shared across all test modules
//!
//! This module provides helper functions for reading example files,
//! creating synthetic logs, and other common testing operations.

#![allow(dead_code)]

use std::path::Path;

/// Helper function to read a text file, panicking with a clear message if not found.
/// This ensures CI catches missing example files instead of silently skipping tests.
pub fn read_example_file(file_path: &str) -> String {
    std::fs::read_to_string(file_path)
        .unwrap_or_else(|e| panic!("Failed to read example file '{}': {}", file_path, e))
}

/// Check if an example file exists (useful for conditional tests)
pub fn example_file_exists(file_path: &str) -> bool {
    Path::new(file_path).exists()
}

/// Example log file paths with their expected shape
pub mod example_files {
    /// Three groups, tool versions, sparse bit-field channel, LF line endings
    pub const VCDS_THREE_GROUPS: &str = "exampleLogs/vcds/LOG-01-001-003-115.csv";
    /// Two groups, no tool versions, CRLF line endings
    pub const VCDS_TWO_GROUPS_CRLF: &str = "exampleLogs/vcds/LOG-17-008-011.csv";
    /// Single group, upper-case `.CSV` extension
    pub const VCDS_UPPERCASE_EXT: &str = "exampleLogs/vcds/LOG-03-002.CSV";

    /// (path, measure group count, data row count)
    pub const ALL: &[(&str, usize, usize)] = &[
        (VCDS_THREE_GROUPS, 3, 20),
        (VCDS_TWO_GROUPS_CRLF, 2, 12),
        (VCDS_UPPERCASE_EXT, 1, 5),
    ];
}

/// Test data generators for synthetic tests
pub mod synthetic {
    /// Header with the given measure groups.
    ///
    /// Every group gets the labels `TIME STAMP`, `Ch<g>a` .. `Ch<g>c` and a
    /// bit field `Flags<g> bin`, so labels only repeat for the time column.
    pub fn header(groups: &[&str]) -> String {
        let mut group_row = vec![String::new()];
        let mut part1 = vec![String::new()];
        let mut part2 = vec!["Marker".to_string()];
        let mut units = vec![String::new()];

        for (k, id) in groups.iter().enumerate() {
            group_row.extend([format!("'{}'", id), "".into(), "".into(), "".into(), "".into()]);
            part1.extend([
                "TIME".to_string(),
                format!("Ch{}a", k),
                format!("Ch{}b", k),
                format!("Ch{}c", k),
                format!("Flags{}", k),
            ]);
            part2.extend([String::from("STAMP"), "".into(), "".into(), "".into(), "bin".into()]);
            units.extend([String::new(), "V".into(), "/min".into(), "%".into(), "".into()]);
        }

        [
            "04/03/23,12,00,00,20:15:30-1,Release_1,DataVersion_1".to_string(),
            "038906019FM,,1.9l R4 EDC".to_string(),
            String::new(),
            group_row.join(","),
            part1.join(","),
            part2.join(","),
            units.join(","),
        ]
        .join("\n")
            + "\n"
    }

    /// One data row; `flags` is left blank when `None`
    pub fn data_row(groups: usize, sample: usize, flags: Option<&str>) -> String {
        let mut fields = vec![String::new()];
        for k in 0..groups {
            fields.push(format!("{}.25", sample));
            fields.push(format!("{}.5", 12 + k));
            fields.push(format!("{}", 805 + 25 * sample));
            fields.push(format!("{}.75", 40 + sample));
            fields.push(flags.unwrap_or("").to_string());
        }
        fields.join(",")
    }

    /// A complete log with `rows` data rows
    pub fn log(groups: &[&str], rows: usize) -> String {
        let mut text = header(groups);
        for sample in 0..rows {
            text.push_str(&data_row(groups.len(), sample, Some("0101")));
            text.push('\n');
        }
        text
    }
}

/// Assertion helpers for common test patterns
pub mod assertions {
    use std::collections::HashSet;
    use vaglog::parsers::LogRecord;

    /// Assert that merging every group loses no label to a collision
    pub fn assert_globally_unique_labels(log: &LogRecord) {
        let total: usize = log.data().iter().map(|g| g.channels().len()).sum();
        let merged: HashSet<&str> = log.data().iter().flat_map(|g| g.labels()).collect();
        assert_eq!(
            total,
            merged.len(),
            "Merging groups should not drop any labels"
        );
        assert_eq!(log.merged(false).channels().len(), total);
    }

    /// Assert that every non bit-field channel has one value per data row
    pub fn assert_dense_non_binary_channels(log: &LogRecord, expected_rows: usize) {
        for group in log.data() {
            for channel in group.channels() {
                if channel.label().to_lowercase().contains("bin") {
                    assert!(
                        channel.len() <= expected_rows,
                        "Bit field '{}' has more values ({}) than rows ({})",
                        channel.label(),
                        channel.len(),
                        expected_rows
                    );
                    continue;
                }
                assert_eq!(
                    channel.len(),
                    expected_rows,
                    "Channel '{}' in group {} should have {} values",
                    channel.label(),
                    group.id(),
                    expected_rows
                );
            }
        }
    }

    /// Assert that every group id appears in the data mapping
    pub fn assert_groups_present(log: &LogRecord) {
        for id in log.measure_groups() {
            assert!(log.group(id).is_some(), "Group {} should be present", id);
        }
    }
}

/// Float comparison helpers for testing
pub mod float_cmp {
    /// Check if two floats are approximately equal within a tolerance
    pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// Assert that two floats are approximately equal
    pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
        assert!(
            approx_eq(a, b, tolerance),
            "Values not approximately equal: {} vs {} (tolerance: {})",
            a,
            b,
            tolerance
        );
    }

    /// Default tolerance for float comparisons (0.0001)
    pub const DEFAULT_TOLERANCE: f64 = 0.0001;
}
