//! Results export
//!
//! Collects per-test reports with a configuration summary and writes them
//! as pretty-printed JSON.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::measurement::Measurement;

/// All results from one benchmark run
#[derive(Debug, Serialize)]
pub struct RunResults {
    /// Configuration summary
    pub config: String,
    /// Per-test records
    pub tests: Vec<TestRecord>,
}

/// Results of a single test
#[derive(Debug, Serialize)]
pub struct TestRecord {
    pub test_name: String,
    pub duration_secs: f64,
    pub measurements: Vec<Measurement>,
}

impl RunResults {
    /// Create new results collection
    pub fn new(config_summary: &str) -> Self {
        Self {
            config: config_summary.to_string(),
            tests: Vec::new(),
        }
    }

    /// Add a test record
    pub fn add_test(
        &mut self,
        test_name: &str,
        duration_secs: f64,
        measurements: Vec<Measurement>,
    ) {
        self.tests.push(TestRecord {
            test_name: test_name.to_string(),
            duration_secs,
            measurements,
        });
    }

    /// Write all results to a JSON file
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let mut file = File::create(path)?;
        writeln!(
            file,
            "{}",
            serde_json::to_string_pretty(self).expect("results are always serializable")
        )?;
        Ok(())
    }
}

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
