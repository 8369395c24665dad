//! Benchmark configuration derived from CLI arguments

use super::cli::{parse_ratio, AccessKind, CliArgs};
use std::path::PathBuf;

/// Complete benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
    // Workloads
    pub tests: Vec<String>,

    // Parallelism
    pub workers: usize,
    pub thread_counts: Vec<usize>,
    pub access: AccessKind,

    // Buffer sizing
    pub cache_bytes: usize,
    pub memory_factor: usize,
    pub scaling_len: usize,
    pub array_len: usize,

    // Bandwidth
    pub granularities: Vec<usize>,
    pub ratios: Vec<(u32, u32)>,

    // Stride
    pub strides: Vec<usize>,

    // Matrix
    pub matrix_sizes: Vec<usize>,
    pub block_size: usize,

    // Compression
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub copies: usize,
    pub quality: u32,
    pub payload_bytes: usize,

    // Output
    pub output_path: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,

    // Control
    pub seed: u64,
}

impl BenchConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        // Validate first
        args.validate()?;

        let ratios = args
            .ratios
            .iter()
            .map(|s| parse_ratio(s))
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Self {
            tests: args.tests.clone(),

            workers: args.effective_workers() as usize,
            thread_counts: args.thread_counts.clone(),
            access: args.access,

            cache_bytes: args.cache_bytes,
            memory_factor: args.memory_factor,
            scaling_len: args.scaling_len,
            array_len: args.array_len,

            granularities: args.granularities.clone(),
            ratios,

            strides: args.strides.clone(),

            matrix_sizes: args.matrix_sizes.clone(),
            block_size: args.block_size,

            inputs: args.inputs.clone(),
            output_dir: args.output_dir.clone(),
            copies: args.copies,
            quality: args.quality,
            payload_bytes: args.payload_bytes,

            output_path: args.output.clone(),
            quiet: args.quiet,
            verbose: args.verbose,

            seed: args.seed,
        })
    }

    /// One-line configuration summary for exports
    pub fn summary(&self) -> String {
        format!(
            "tests={:?}, workers={}, thread_counts={:?}, access={}, seed={}",
            self.tests, self.workers, self.thread_counts, self.access, self.seed
        )
    }
}
