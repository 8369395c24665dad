//! membench library
//!
//! Memory-hierarchy micro-benchmark suite: access latency, bandwidth,
//! thread-scaling, TLB stride, matmul cache effects, and a compression
//! pipeline comparison.

pub mod benchmark;
pub mod compress;
pub mod config;
pub mod metrics;
pub mod utils;
pub mod workload;
