//! Command-line argument parsing
//!
//! Every measurement knob (array sizes, thread counts, strides,
//! granularities, quality) is a flag here. Arguments are grouped by
//! category for clarity.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Memory-hierarchy micro-benchmark suite
#[derive(Parser, Debug, Clone)]
#[command(name = "membench")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Workload Selection =====
    /// Benchmark type(s) to run
    #[arg(
        short = 't',
        long = "tests",
        value_delimiter = ',',
        default_value = "latency,scaling,bandwidth,stride"
    )]
    pub tests: Vec<String>,

    // ===== Parallelism =====
    /// Worker threads for matmul/compress (0 = auto-detect)
    #[arg(short = 'w', long = "workers", default_value_t = 0)]
    pub workers: u32,

    /// Thread counts for the scaling sweep
    #[arg(
        long = "thread-counts",
        value_delimiter = ',',
        default_value = "1,2,4,8,16"
    )]
    pub thread_counts: Vec<usize>,

    /// Access mode for the latency and scaling sweeps
    #[arg(long = "access", value_enum, default_value_t = AccessKind::Read)]
    pub access: AccessKind,

    // ===== Buffer Sizing =====
    /// Cache-resident working set in bytes
    #[arg(long = "cache-bytes", default_value_t = 1024 * 1024)]
    pub cache_bytes: usize,

    /// Main-memory working set as a multiple of --cache-bytes
    #[arg(long = "memory-factor", default_value_t = 100)]
    pub memory_factor: usize,

    /// Element count of the scaling-sweep buffer
    #[arg(long = "scaling-len", default_value_t = 1_000_000)]
    pub scaling_len: usize,

    /// Element count of the bandwidth/stride buffer
    #[arg(long = "array-len", default_value_t = 10_000_000)]
    pub array_len: usize,

    // ===== Bandwidth Options =====
    /// Block granularities in bytes
    #[arg(
        long = "granularities",
        value_delimiter = ',',
        default_value = "64,256,1024"
    )]
    pub granularities: Vec<usize>,

    /// read:write ratios per block (e.g. 7:3)
    #[arg(
        long = "ratios",
        value_delimiter = ',',
        default_value = "1:0,0:1,7:3,5:5"
    )]
    pub ratios: Vec<String>,

    // ===== Stride Options =====
    /// Strides in elements for the TLB sweep
    #[arg(
        long = "strides",
        value_delimiter = ',',
        default_value = "1,16,64,256,1024"
    )]
    pub strides: Vec<usize>,

    // ===== Matrix Options =====
    /// Square matrix sizes for the matmul workload
    #[arg(
        long = "matrix-sizes",
        value_delimiter = ',',
        default_value = "64,256,512"
    )]
    pub matrix_sizes: Vec<usize>,

    /// Block edge for the cache-blocked multiply
    #[arg(long = "block-size", default_value_t = 64)]
    pub block_size: usize,

    // ===== Compression Options =====
    /// Input file(s) to compress (a synthetic payload is generated when omitted)
    #[arg(short = 'i', long = "input", action = clap::ArgAction::Append)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for compressed artifacts
    #[arg(long = "output-dir", default_value = "compressed")]
    pub output_dir: PathBuf,

    /// Times each input is replicated into the task list
    #[arg(long = "copies", default_value_t = 8)]
    pub copies: usize,

    /// Compression quality (1-100, mapped onto codec levels)
    #[arg(long = "quality", default_value_t = 20)]
    pub quality: u32,

    /// Synthetic payload size in bytes when no --input is given
    #[arg(long = "payload-bytes", default_value_t = 1024 * 1024)]
    pub payload_bytes: usize,

    // ===== Output Options =====
    /// Write results to a JSON file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    // ===== Advanced Options =====
    /// Seed for random number generation (0 = random seed)
    #[arg(long = "seed", default_value_t = 0)]
    pub seed: u64,
}

/// Access mode for sweep workloads
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessKind {
    #[default]
    Read,
    Write,
}

impl AccessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessKind::Read => "read",
            AccessKind::Write => "write",
        }
    }
}

impl std::fmt::Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.quality == 0 || self.quality > 100 {
            return Err("--quality must be between 1 and 100".to_string());
        }

        if self.thread_counts.is_empty() || self.thread_counts.contains(&0) {
            return Err("--thread-counts entries must be at least 1".to_string());
        }

        if self.strides.contains(&0) {
            return Err("--strides entries must be at least 1".to_string());
        }

        if self.granularities.contains(&0) {
            return Err("--granularities entries must be at least 1 byte".to_string());
        }

        if self.matrix_sizes.contains(&0) {
            return Err("--matrix-sizes entries must be at least 1".to_string());
        }

        if self.block_size == 0 {
            return Err("--block-size must be at least 1".to_string());
        }

        if self.memory_factor == 0 {
            return Err("--memory-factor must be at least 1".to_string());
        }

        if self.copies == 0 {
            return Err("--copies must be at least 1".to_string());
        }

        for ratio in &self.ratios {
            parse_ratio(ratio)?;
        }

        Ok(())
    }

    /// Get effective number of workers (0 = auto-detect)
    pub fn effective_workers(&self) -> u32 {
        if self.workers == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get() as u32)
                .unwrap_or(4)
        } else {
            self.workers
        }
    }
}

/// Parse a `reads:writes` ratio string
pub fn parse_ratio(s: &str) -> Result<(u32, u32), String> {
    let (reads, writes) = s
        .split_once(':')
        .ok_or_else(|| format!("Invalid ratio '{}': expected reads:writes", s))?;

    let reads: u32 = reads
        .trim()
        .parse()
        .map_err(|_| format!("Invalid read count in ratio '{}'", s))?;
    let writes: u32 = writes
        .trim()
        .parse()
        .map_err(|_| format!("Invalid write count in ratio '{}'", s))?;

    if reads == 0 && writes == 0 {
        return Err(format!("Ratio '{}' performs no accesses", s));
    }

    Ok((reads, writes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["test"]);
        assert_eq!(args.cache_bytes, 1024 * 1024);
        assert_eq!(args.memory_factor, 100);
        assert_eq!(args.thread_counts, vec![1, 2, 4, 8, 16]);
        assert_eq!(args.quality, 20);
        assert_eq!(args.copies, 8);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_list_args() {
        let args = CliArgs::parse_from(["test", "--strides", "1,32", "--thread-counts", "2,4"]);
        assert_eq!(args.strides, vec![1, 32]);
        assert_eq!(args.thread_counts, vec![2, 4]);
    }

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("1:0"), Ok((1, 0)));
        assert_eq!(parse_ratio("7:3"), Ok((7, 3)));
        assert!(parse_ratio("0:0").is_err());
        assert!(parse_ratio("7").is_err());
        assert!(parse_ratio("a:b").is_err());
    }

    #[test]
    fn test_validation_zero_quality() {
        let args = CliArgs::parse_from(["test", "--quality", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_thread_count() {
        let args = CliArgs::parse_from(["test", "--thread-counts", "1,0,4"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_effective_workers_explicit() {
        let args = CliArgs::parse_from(["test", "-w", "6"]);
        assert_eq!(args.effective_workers(), 6);
    }

    #[test]
    fn test_effective_workers_auto() {
        let args = CliArgs::parse_from(["test"]);
        assert!(args.effective_workers() >= 1);
    }
}
