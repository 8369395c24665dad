//! Wall-clock timing and metric derivation
//!
//! The measurement interval covers only the phase under test: callers
//! construct buffers before `time_phase` and aggregate results after it.

use std::time::{Duration, Instant};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Time a single phase with a monotonic high-resolution clock
pub fn time_phase<T, F: FnOnce() -> T>(f: F) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Average latency per element access in nanoseconds
pub fn ns_per_access(elapsed: Duration, accesses: u64) -> f64 {
    if accesses == 0 {
        return 0.0;
    }
    elapsed.as_nanos() as f64 / accesses as f64
}

/// Aggregate transfer rate in GiB per second
pub fn gib_per_sec(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    bytes as f64 / secs / GIB
}

/// Per-thread latency in microseconds (total interval divided by the
/// worker count, the thread-scaling metric)
pub fn micros_per_worker(elapsed: Duration, workers: usize) -> f64 {
    if workers == 0 {
        return 0.0;
    }
    elapsed.as_secs_f64() * 1e6 / workers as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_phase_returns_closure_output() {
        let (value, elapsed) = time_phase(|| 41 + 1);
        assert_eq!(value, 42);
        assert!(elapsed.as_secs() < 1);
    }

    #[test]
    fn test_ns_per_access() {
        let latency = ns_per_access(Duration::from_micros(1), 1000);
        assert!((latency - 1.0).abs() < f64::EPSILON);
        assert_eq!(ns_per_access(Duration::from_secs(1), 0), 0.0);
    }

    #[test]
    fn test_gib_per_sec() {
        let rate = gib_per_sec(1024 * 1024 * 1024, Duration::from_secs(2));
        assert!((rate - 0.5).abs() < 1e-9);
        assert_eq!(gib_per_sec(100, Duration::from_secs(0)), 0.0);
    }

    #[test]
    fn test_micros_per_worker() {
        let per_worker = micros_per_worker(Duration::from_millis(4), 4);
        assert!((per_worker - 1000.0).abs() < 1e-6);
    }
}
