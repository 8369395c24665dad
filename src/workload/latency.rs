//! Cache vs. main-memory access latency
//!
//! Sweeps two working sets: one sized to fit in cache and one large enough
//! to spill into main memory, measuring average per-access latency for
//! reads and writes.

use tracing::debug;

use super::access::{read_sweep, write_sweep, ELEM_BYTES};
use crate::benchmark::{ns_per_access, time_phase};
use crate::config::{AccessKind, BenchConfig};
use crate::metrics::Measurement;
use crate::utils::Result;

pub fn run(config: &BenchConfig) -> Result<Vec<Measurement>> {
    let cache_len = (config.cache_bytes / ELEM_BYTES).max(1);
    let memory_len = cache_len * config.memory_factor;

    debug!(
        cache_len,
        memory_len, "latency working sets (elements)"
    );

    let mut out = Vec::with_capacity(4);
    for (tier, len) in [("cache", cache_len), ("memory", memory_len)] {
        for access in [AccessKind::Read, AccessKind::Write] {
            let latency = measure_latency(len, access);
            out.push(Measurement::new(
                format!("{} {} latency", tier, access),
                latency,
                "ns/access",
            ));
        }
    }

    Ok(out)
}

/// Average per-access latency of a full sequential sweep, in nanoseconds.
/// Buffer construction happens outside the timed phase.
fn measure_latency(len: usize, access: AccessKind) -> f64 {
    let mut arr = vec![1.0f64; len];

    let ((), elapsed) = time_phase(|| match access {
        AccessKind::Read => read_sweep(&arr),
        AccessKind::Write => write_sweep(0, &mut arr),
    });
    std::hint::black_box(&arr);

    ns_per_access(elapsed, len as u64)
}
