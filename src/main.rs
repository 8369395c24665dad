//! membench - memory-hierarchy micro-benchmark suite
//!
//! Measures cache vs. main-memory latency, bandwidth under varying access
//! granularity and read/write ratios, thread-scaling latency, TLB-miss
//! sensitivity to stride, matrix-multiply cache effects, and a
//! single-threaded vs. multithreaded compression comparison.

use anyhow::Result;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

mod benchmark;
mod compress;
mod config;
mod metrics;
mod utils;
mod workload;

use benchmark::Orchestrator;
use config::{BenchConfig, CliArgs};
use metrics::format_count;
use workload::BenchKind;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &BenchConfig) {
    if config.quiet {
        return;
    }

    let kinds: Vec<BenchKind> = config
        .tests
        .iter()
        .filter_map(|t| BenchKind::parse(t))
        .collect();

    println!("membench v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!("Tests: {:?}", config.tests);
    println!(
        "Cache bytes: {}, Memory factor: {}, Array len: {}",
        format_count(config.cache_bytes as u64),
        config.memory_factor,
        format_count(config.array_len as u64)
    );
    if kinds.iter().any(|k| k.is_multithreaded()) {
        println!(
            "Workers: {}, Thread counts: {:?}, Access: {}",
            config.workers, config.thread_counts, config.access
        );
    }
    if kinds.contains(&BenchKind::Compress) {
        println!(
            "Compression: quality={}, copies={}, output={:?}",
            config.quality, config.copies, config.output_dir
        );
    }
    println!("====================================\n");
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    // Build configuration
    let config = BenchConfig::from_cli(&args)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Print banner
    print_banner(&config);

    // Run all tests
    let orchestrator = Orchestrator::new(config.clone());
    let reports = orchestrator.run_all()?;

    // Export to JSON if requested
    if let Some(ref output_path) = config.output_path {
        orchestrator.export_json(&reports, output_path)?;
        if !config.quiet {
            println!("\nResults written to: {:?}", output_path);
        }
    }

    // Print summary
    if !config.quiet {
        println!("\n====================================");
        println!("BENCHMARK COMPLETE");
        println!("====================================");
        println!("Tests run: {}", reports.len());

        let total_measurements: usize = reports.iter().map(|r| r.measurements.len()).sum();
        println!("Measurements: {}", total_measurements);
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
