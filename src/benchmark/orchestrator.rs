//! Benchmark orchestrator
//!
//! Runs the configured workloads in order, collects per-test reports, and
//! manages the run lifecycle (progress display, summaries, JSON export).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::counters::PoolCounters;
use super::timing::time_phase;
use crate::compress::{self, DeflateCodec};
use crate::config::BenchConfig;
use crate::metrics::{Measurement, RunResults};
use crate::utils::{BenchError, Result};
use crate::workload::{self, BenchKind};

/// Benchmark result summary for one test
pub struct BenchReport {
    /// Test name
    pub test_name: String,
    /// Total test duration (including buffer construction)
    pub duration: Duration,
    /// Derived metrics, one console line each
    pub measurements: Vec<Measurement>,
}

impl BenchReport {
    /// Print summary (compact format)
    pub fn print_summary(&self) {
        println!("\n=== {} ===", self.test_name);
        for measurement in &self.measurements {
            println!("{}", measurement);
        }
        println!(
            "({} measurements in {:.2}s)",
            self.measurements.len(),
            self.duration.as_secs_f64()
        );
    }
}

/// Benchmark orchestrator
pub struct Orchestrator {
    config: Arc<BenchConfig>,
}

impl Orchestrator {
    /// Create new orchestrator
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Run all configured tests
    pub fn run_all(&self) -> Result<Vec<BenchReport>> {
        let mut reports = Vec::new();

        for test_name in &self.config.tests {
            let kind = BenchKind::parse(test_name)
                .ok_or_else(|| BenchError::Config(format!("Unknown test: {}", test_name)))?;

            if !self.config.quiet {
                println!("\nRunning test: {}", kind);
            }
            let report = self.run_test(kind)?;
            if !self.config.quiet {
                report.print_summary();
            }
            reports.push(report);
        }

        Ok(reports)
    }

    /// Run a single benchmark test
    pub fn run_test(&self, kind: BenchKind) -> Result<BenchReport> {
        let (measurements, duration) = time_phase(|| match kind {
            BenchKind::Latency => workload::latency::run(&self.config),
            BenchKind::Scaling => workload::scaling::run(&self.config),
            BenchKind::Bandwidth => workload::bandwidth::run(&self.config),
            BenchKind::Stride => workload::stride::run(&self.config),
            BenchKind::Matmul => workload::matmul::run(&self.config),
            BenchKind::Compress => self.run_compress(),
        });

        Ok(BenchReport {
            test_name: kind.as_str().to_string(),
            duration,
            measurements: measurements?,
        })
    }

    /// Run the compression comparison: sequential baseline, then the
    /// queue-driven pool over an identical job list
    fn run_compress(&self) -> Result<Vec<Measurement>> {
        let codec = DeflateCodec::new(self.config.quality)?;
        std::fs::create_dir_all(&self.config.output_dir)?;

        let inputs = if self.config.inputs.is_empty() {
            vec![self.write_synthetic_payload()?]
        } else {
            self.config.inputs.clone()
        };

        let seq_jobs =
            compress::expand_jobs(&inputs, &self.config.output_dir, "seq", self.config.copies);
        let task_count = seq_jobs.len();

        info!(task_count, "compressing sequentially");
        let seq = compress::run_sequential(&seq_jobs, &codec)?;

        let pool_jobs =
            compress::expand_jobs(&inputs, &self.config.output_dir, "pool", self.config.copies);
        let counters = Arc::new(PoolCounters::new());

        // Progress reporting (if not quiet)
        if !self.config.quiet {
            let counters = Arc::clone(&counters);
            let total = task_count as u64;
            thread::spawn(move || {
                Self::report_progress(&counters, total);
            });
        }

        info!(task_count, workers = self.config.workers, "compressing via queue pool");
        let pool = compress::run_queued(pool_jobs, self.config.workers, &codec, Arc::clone(&counters));
        counters.signal_shutdown();
        let pool = pool?;

        let mut out = vec![
            Measurement::new(
                format!("compress {} tasks single-threaded", task_count),
                seq.elapsed.as_secs_f64(),
                "s",
            ),
            Measurement::new(
                format!("compress {} tasks threads={}", task_count, self.config.workers),
                pool.elapsed.as_secs_f64(),
                "s",
            ),
            Measurement::new("compress ratio", pool.ratio(), "out/in"),
        ];

        if !pool.histogram.is_empty() {
            out.push(Measurement::new(
                "compress per-task p50",
                pool.histogram.value_at_percentile(50.0) as f64 / 1000.0,
                "ms",
            ));
            out.push(Measurement::new(
                "compress per-task p99",
                pool.histogram.value_at_percentile(99.0) as f64 / 1000.0,
                "ms",
            ));
        }

        Ok(out)
    }

    /// Generate a seeded semi-compressible payload when no input is given
    fn write_synthetic_payload(&self) -> Result<PathBuf> {
        let seed = if self.config.seed == 0 {
            fastrand::u64(..)
        } else {
            self.config.seed
        };
        let mut rng = fastrand::Rng::with_seed(seed);

        let mut payload = vec![0u8; self.config.payload_bytes];
        if !payload.is_empty() {
            // Random head repeated through the tail, so the payload is
            // neither incompressible noise nor a trivial constant run
            let head = (payload.len() / 4).max(1).min(payload.len());
            rng.fill(&mut payload[..head]);
            for i in head..payload.len() {
                payload[i] = payload[i - head];
            }
        }

        let path = self.config.output_dir.join("payload.bin");
        std::fs::write(&path, &payload)?;
        Ok(path)
    }

    /// Report queue-pool progress until the countdown drains
    fn report_progress(counters: &PoolCounters, total: u64) {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({msg})",
                )
                .unwrap()
                .progress_chars("#>-"),
        );

        while !counters.is_shutdown() {
            let (completed, _) = counters.progress();
            pb.set_position(completed);

            if completed >= total {
                break;
            }

            thread::sleep(Duration::from_millis(100));
        }

        pb.finish_with_message("done");
    }

    /// Export results to JSON file
    pub fn export_json(&self, reports: &[BenchReport], path: &Path) -> Result<()> {
        let mut results = RunResults::new(&self.config.summary());

        for report in reports {
            results.add_test(
                &report.test_name,
                report.duration.as_secs_f64(),
                report.measurements.clone(),
            );
        }

        results.write_json(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliArgs;
    use clap::Parser;

    fn config_from(args: &[&str]) -> BenchConfig {
        let mut full = vec!["test", "-q"];
        full.extend_from_slice(args);
        BenchConfig::from_cli(&CliArgs::parse_from(full)).unwrap()
    }

    #[test]
    fn test_run_all_rejects_unknown_test() {
        let orchestrator = Orchestrator::new(config_from(&["-t", "nonsense"]));
        assert!(orchestrator.run_all().is_err());
    }

    #[test]
    fn test_run_stride_test() {
        let orchestrator = Orchestrator::new(config_from(&[
            "-t",
            "stride",
            "--array-len",
            "4096",
            "--strides",
            "1,64",
        ]));

        let reports = orchestrator.run_all().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].test_name, "STRIDE");
        assert_eq!(reports[0].measurements.len(), 4);
    }

    #[test]
    fn test_run_compress_synthetic_payload() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("artifacts");
        let orchestrator = Orchestrator::new(config_from(&[
            "-t",
            "compress",
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--copies",
            "4",
            "-w",
            "2",
            "--payload-bytes",
            "8192",
            "--seed",
            "3",
        ]));

        let reports = orchestrator.run_all().unwrap();
        assert_eq!(reports[0].test_name, "COMPRESS");

        // Both phases wrote their artifacts
        let names: Vec<String> = std::fs::read_dir(&out_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.iter().filter(|n| n.contains(".seq.")).count(), 4);
        assert_eq!(names.iter().filter(|n| n.contains(".pool.")).count(), 4);
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let orchestrator = Orchestrator::new(config_from(&[
            "-t",
            "stride",
            "--array-len",
            "1024",
            "--strides",
            "16",
        ]));

        let reports = orchestrator.run_all().unwrap();
        orchestrator.export_json(&reports, &path).unwrap();
        assert!(path.exists());
    }
}
