//! Benchmark execution core
//!
//! This module provides the partition/pool/timing machinery shared by the
//! workloads:
//! - partition: static exact-cover chunking of a buffer
//! - StaticPool: fixed set of sweep workers with join/barrier semantics
//! - PoolCounters: atomic completion countdown for queue-driven pools
//! - timing: phase clock and metric derivations
//! - Orchestrator: runs configured workloads and collects reports

pub mod counters;
pub mod orchestrator;
pub mod partition;
pub mod pool;
pub mod timing;

pub use counters::PoolCounters;
pub use orchestrator::{BenchReport, Orchestrator};
pub use partition::partition;
pub use pool::StaticPool;
pub use timing::{gib_per_sec, micros_per_worker, ns_per_access, time_phase};
