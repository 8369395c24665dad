//! Strided access sweep
//!
//! Read-modify-writes one element every `stride` positions. Large strides
//! touch a new page almost every access, exposing TLB-miss cost in the
//! elapsed time.

use super::access::ELEM_BYTES;
use crate::benchmark::{ns_per_access, time_phase};
use crate::config::BenchConfig;
use crate::metrics::Measurement;
use crate::utils::Result;

pub fn run(config: &BenchConfig) -> Result<Vec<Measurement>> {
    let len = config.array_len;
    let mut out = Vec::with_capacity(config.strides.len() * 2);

    for &stride in &config.strides {
        let mut arr = vec![1.0f64; len];

        let ((), elapsed) = time_phase(|| {
            let mut i = 0;
            while i < len {
                arr[i] *= 2.0;
                i += stride;
            }
        });
        std::hint::black_box(&arr);

        let touched = len.div_ceil(stride) as u64;
        out.push(Measurement::new(
            format!("stride={} ({}B) sweep", stride, stride * ELEM_BYTES),
            elapsed.as_secs_f64(),
            "s",
        ));
        out.push(Measurement::new(
            format!("stride={} per-access", stride),
            ns_per_access(elapsed, touched),
            "ns/access",
        ));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliArgs;
    use clap::Parser;

    #[test]
    fn test_two_measurements_per_stride() {
        let args = CliArgs::parse_from(["test", "--array-len", "8192", "--strides", "1,16,64"]);
        let config = BenchConfig::from_cli(&args).unwrap();

        let out = run(&config).unwrap();
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].label, "stride=1 (8B) sweep");
        assert_eq!(out[0].unit, "s");
        assert_eq!(out[1].label, "stride=1 per-access");
        assert_eq!(out[1].unit, "ns/access");
    }

    #[test]
    fn test_stride_larger_than_array() {
        let args = CliArgs::parse_from(["test", "--array-len", "100", "--strides", "1000"]);
        let config = BenchConfig::from_cli(&args).unwrap();

        // Touches only index 0
        let out = run(&config).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[1].value >= 0.0);
    }
}
