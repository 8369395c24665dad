//! Memory bandwidth under varying granularity and read/write ratio
//!
//! Steps through the buffer block by block, performing `reads` summing
//! passes and `writes` filling passes per block, and reports GiB/s. Bytes
//! are counted as actually touched: one full pass over the array per read
//! and per write in the ratio.

use std::hint::black_box;

use super::access::ELEM_BYTES;
use crate::benchmark::{gib_per_sec, time_phase};
use crate::config::BenchConfig;
use crate::metrics::Measurement;
use crate::utils::Result;

pub fn run(config: &BenchConfig) -> Result<Vec<Measurement>> {
    let len = config.array_len;
    let mut out = Vec::with_capacity(config.granularities.len() * config.ratios.len());

    for &gran_bytes in &config.granularities {
        let gran = (gran_bytes / ELEM_BYTES).max(1);
        for &(reads, writes) in &config.ratios {
            let rate = measure_bandwidth(len, gran, reads, writes);
            out.push(Measurement::new(
                format!("bandwidth block={}B r={} w={}", gran_bytes, reads, writes),
                rate,
                "GiB/s",
            ));
        }
    }

    Ok(out)
}

fn measure_bandwidth(len: usize, gran: usize, reads: u32, writes: u32) -> f64 {
    let mut arr = vec![1.0f64; len];

    let ((), elapsed) = time_phase(|| {
        let mut i = 0;
        while i < len {
            let end = (i + gran).min(len);

            for _ in 0..reads {
                let mut acc = 0.0f64;
                for &v in &arr[i..end] {
                    acc += v;
                }
                black_box(acc);
            }

            for _ in 0..writes {
                for slot in arr[i..end].iter_mut() {
                    *slot = i as f64;
                }
            }

            i = end;
        }
    });
    black_box(&arr);

    // The blocks tile the array exactly, so each pass touches len elements
    let bytes = len as u64 * ELEM_BYTES as u64 * (reads + writes) as u64;
    gib_per_sec(bytes, elapsed)
}
