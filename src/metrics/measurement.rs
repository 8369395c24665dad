//! Measurement values
//!
//! A measurement is a derived scalar computed once, after all workers have
//! completed. The console format is one line per measurement:
//! `<label>: <value> <unit>`.

use serde::Serialize;
use std::fmt;

/// A single derived metric
#[derive(Debug, Clone, Serialize)]
pub struct Measurement {
    pub label: String,
    pub value: f64,
    pub unit: &'static str,
}

impl Measurement {
    pub fn new(label: impl Into<String>, value: f64, unit: &'static str) -> Self {
        Self {
            label: label.into(),
            value,
            unit,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.4} {}", self.label, self.value, self.unit)
    }
}
