//! Metrics and reporting
//!
//! This module provides:
//! - The `Measurement` value type and its console line format
//! - Run-level result aggregation and JSON export

pub mod measurement;
pub mod reporter;

pub use measurement::Measurement;
pub use reporter::{format_count, RunResults};
