//! Measurement workloads
//!
//! Each workload constructs its own buffers, times the phase under test
//! through the benchmark core, and returns one `Measurement` per derived
//! metric.

pub mod access;
pub mod bandwidth;
pub mod latency;
pub mod matmul;
pub mod scaling;
pub mod stride;
pub mod workload_type;

pub use access::{read_sweep, write_sweep, ELEM_BYTES};
pub use workload_type::BenchKind;
