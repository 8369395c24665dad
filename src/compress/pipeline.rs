//! Compression pipeline
//!
//! Two execution modes over the same job list: a sequential baseline and a
//! queue-driven worker pool. Pool workers repeatedly dequeue one tagged task
//! from a bounded channel; `Task::Stop` tells a worker to terminate. All real
//! tasks are enqueued before any stop message, exactly one stop is pushed per
//! worker, and the caller joins every worker before returning. Each worker
//! records per-task latency in a thread-local histogram, merged at join.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use hdrhistogram::Histogram;
use tracing::warn;

use super::codec::DeflateCodec;
use crate::benchmark::PoolCounters;
use crate::utils::{BenchError, CompressError, PartitionError, Result};

/// One compression task: read input, compress, write output
#[derive(Debug, Clone)]
pub struct CompressJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Tagged queue message; `Stop` terminates one worker
enum Task {
    Work(CompressJob),
    Stop,
}

/// Outcome of one pipeline run
pub struct PipelineResult {
    /// Tasks that completed successfully
    pub completed: u64,
    /// Task failures
    pub error_count: u64,
    /// Wall-clock interval of the processing phase
    pub elapsed: Duration,
    /// Per-task latencies in microseconds
    pub histogram: Histogram<u64>,
    /// Total payload bytes read
    pub bytes_in: u64,
    /// Total compressed bytes written
    pub bytes_out: u64,
}

impl PipelineResult {
    fn new() -> Self {
        Self {
            completed: 0,
            error_count: 0,
            elapsed: Duration::ZERO,
            histogram: new_histogram(),
            bytes_in: 0,
            bytes_out: 0,
        }
    }

    /// Compression ratio (output / input)
    pub fn ratio(&self) -> f64 {
        if self.bytes_in == 0 {
            return 0.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64
    }
}

/// Per-worker state returned by value at join
struct WorkerOutcome {
    histogram: Histogram<u64>,
    completed: u64,
    bytes_in: u64,
    bytes_out: u64,
    first_error: Option<BenchError>,
}

fn new_histogram() -> Histogram<u64> {
    // 1us to 1 hour, 3 significant digits
    Histogram::new_with_bounds(1, 3_600_000_000, 3).expect("Failed to create histogram")
}

/// Expand an input list into a job list, replicating each input `copies`
/// times with unique output names under `output_dir`.
pub fn expand_jobs(
    inputs: &[PathBuf],
    output_dir: &Path,
    tag: &str,
    copies: usize,
) -> Vec<CompressJob> {
    let mut jobs = Vec::with_capacity(inputs.len() * copies);
    let mut seq = 0;

    for _ in 0..copies {
        for input in inputs {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "payload".to_string());
            let output = output_dir.join(format!("{}.{}.{}.gz", stem, tag, seq));
            jobs.push(CompressJob {
                input: input.clone(),
                output,
            });
            seq += 1;
        }
    }

    jobs
}

/// Process the job list on the calling thread, one task at a time.
///
/// Fails fast on the first task error; there is no pool to drain.
pub fn run_sequential(jobs: &[CompressJob], codec: &DeflateCodec) -> Result<PipelineResult> {
    let mut result = PipelineResult::new();

    let start = Instant::now();
    for job in jobs {
        let task_start = Instant::now();
        let (bytes_in, bytes_out) = process_job(job, codec)?;
        result
            .histogram
            .record(task_start.elapsed().as_micros() as u64)
            .ok();
        result.completed += 1;
        result.bytes_in += bytes_in;
        result.bytes_out += bytes_out;
    }
    result.elapsed = start.elapsed();

    Ok(result)
}

/// Process the job list through a queue-driven worker pool.
///
/// Blocks until all workers have been joined. The first task failure is
/// surfaced to the caller only after the queue has drained and every worker
/// has terminated; remaining tasks still complete.
pub fn run_queued(
    jobs: Vec<CompressJob>,
    workers: usize,
    codec: &DeflateCodec,
    counters: Arc<PoolCounters>,
) -> Result<PipelineResult> {
    if workers == 0 {
        return Err(PartitionError::ZeroWorkers.into());
    }

    // Capacity for every task plus one stop message per worker, so no send
    // ever blocks
    let (tx, rx): (Sender<Task>, Receiver<Task>) =
        crossbeam_channel::bounded(jobs.len() + workers);
    counters.record_enqueued(jobs.len() as u64);

    let start = Instant::now();

    let handles: Vec<JoinHandle<WorkerOutcome>> = (0..workers)
        .map(|id| {
            let rx = rx.clone();
            let codec = codec.clone();
            let counters = Arc::clone(&counters);
            thread::Builder::new()
                .name(format!("compress-worker-{}", id))
                .spawn(move || worker_loop(id, rx, codec, counters))
                .expect("Failed to spawn worker thread")
        })
        .collect();
    drop(rx);

    // All real tasks before any stop, then exactly one stop per worker.
    // A send only fails if every worker already died; stop feeding and let
    // join surface what happened.
    let mut queue_open = true;
    for job in jobs {
        if tx.send(Task::Work(job)).is_err() {
            queue_open = false;
            break;
        }
    }
    if queue_open {
        for _ in 0..workers {
            if tx.send(Task::Stop).is_err() {
                break;
            }
        }
    }
    drop(tx);

    // Join all workers before surfacing any failure
    let mut result = PipelineResult::new();
    let mut first_error = None;

    for handle in handles {
        match handle.join() {
            Ok(outcome) => {
                result.histogram.add(&outcome.histogram).ok();
                result.completed += outcome.completed;
                result.bytes_in += outcome.bytes_in;
                result.bytes_out += outcome.bytes_out;
                if first_error.is_none() {
                    first_error = outcome.first_error;
                }
            }
            Err(_) => {
                if first_error.is_none() {
                    first_error = Some(BenchError::Worker("worker panicked".to_string()));
                }
            }
        }
    }
    result.elapsed = start.elapsed();
    result.error_count = counters.errors();

    match first_error {
        Some(e) => Err(e),
        None => Ok(result),
    }
}

/// Worker loop: dequeue one task at a time until told to stop
fn worker_loop(
    id: usize,
    rx: Receiver<Task>,
    codec: DeflateCodec,
    counters: Arc<PoolCounters>,
) -> WorkerOutcome {
    let mut outcome = WorkerOutcome {
        histogram: new_histogram(),
        completed: 0,
        bytes_in: 0,
        bytes_out: 0,
        first_error: None,
    };

    loop {
        match rx.recv() {
            Ok(Task::Work(job)) => {
                let start = Instant::now();
                match process_job(&job, &codec) {
                    Ok((bytes_in, bytes_out)) => {
                        outcome
                            .histogram
                            .record(start.elapsed().as_micros() as u64)
                            .ok();
                        outcome.completed += 1;
                        outcome.bytes_in += bytes_in;
                        outcome.bytes_out += bytes_out;
                    }
                    Err(e) => {
                        warn!("Worker {}: task failed: {}", id, e);
                        counters.record_error();
                        if outcome.first_error.is_none() {
                            outcome.first_error = Some(e);
                        }
                    }
                }
                // Countdown covers every processed task, success or failure
                counters.record_completed();
            }
            Ok(Task::Stop) => break,
            // Producer gone without a stop message; nothing more will arrive
            Err(_) => break,
        }
    }

    outcome
}

/// Read, compress, write one payload; returns (input bytes, output bytes)
fn process_job(job: &CompressJob, codec: &DeflateCodec) -> Result<(u64, u64)> {
    let input = fs::read(&job.input).map_err(|e| CompressError::Read {
        path: job.input.clone(),
        source: e,
    })?;

    let encoded = codec.compress(&input)?;

    fs::write(&job.output, &encoded).map_err(|e| CompressError::Write {
        path: job.output.clone(),
        source: e,
    })?;

    Ok((input.len() as u64, encoded.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn make_input(dir: &Path, name: &str, len: usize) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![b'x'; len]).unwrap();
        path
    }

    #[test]
    fn test_expand_jobs_unique_outputs() {
        let inputs = vec![PathBuf::from("a.bin"), PathBuf::from("b.bin")];
        let jobs = expand_jobs(&inputs, Path::new("/out"), "pool", 3);

        assert_eq!(jobs.len(), 6);
        let outputs: std::collections::HashSet<_> = jobs.iter().map(|j| &j.output).collect();
        assert_eq!(outputs.len(), 6, "output names must not collide");
    }

    #[test]
    fn test_sequential_compresses_all_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path(), "payload.bin", 4096);
        let jobs = expand_jobs(&[input], dir.path(), "seq", 3);
        let codec = DeflateCodec::new(50).unwrap();

        let result = run_sequential(&jobs, &codec).unwrap();

        assert_eq!(result.completed, 3);
        assert_eq!(result.error_count, 0);
        assert!(result.bytes_in > result.bytes_out, "'x' payload compresses");
        for job in &jobs {
            assert!(job.output.exists());
        }
    }

    #[test]
    fn test_queued_eight_tasks_four_workers() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path(), "payload.bin", 4096);
        let jobs = expand_jobs(&[input], dir.path(), "pool", 8);
        let codec = DeflateCodec::new(50).unwrap();
        let counters = Arc::new(PoolCounters::new());

        let result = run_queued(jobs.clone(), 4, &codec, Arc::clone(&counters)).unwrap();

        // Every task processed exactly once, queue fully drained
        assert_eq!(result.completed, 8);
        assert_eq!(counters.progress(), (8, 8));
        assert!(counters.is_drained());
        for job in &jobs {
            assert!(job.output.exists(), "missing output {:?}", job.output);
        }
        assert_eq!(result.histogram.len(), 8);
    }

    #[test]
    fn test_queued_single_worker() {
        let dir = tempfile::tempdir().unwrap();
        let input = make_input(dir.path(), "payload.bin", 1024);
        let jobs = expand_jobs(&[input], dir.path(), "pool", 4);
        let codec = DeflateCodec::new(20).unwrap();

        let result =
            run_queued(jobs, 1, &codec, Arc::new(PoolCounters::new())).unwrap();
        assert_eq!(result.completed, 4);
    }

    #[test]
    fn test_queued_zero_workers_fails_fast() {
        let codec = DeflateCodec::new(20).unwrap();
        let result = run_queued(Vec::new(), 0, &codec, Arc::new(PoolCounters::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_queued_surfaces_failure_after_draining() {
        let dir = tempfile::tempdir().unwrap();
        let good = make_input(dir.path(), "good.bin", 1024);
        let missing = dir.path().join("missing.bin");

        let mut jobs = expand_jobs(&[good], dir.path(), "pool", 4);
        jobs.insert(
            0,
            CompressJob {
                input: missing,
                output: dir.path().join("missing.pool.gz"),
            },
        );

        let codec = DeflateCodec::new(20).unwrap();
        let counters = Arc::new(PoolCounters::new());
        let result = run_queued(jobs, 2, &codec, Arc::clone(&counters));

        // The bad task fails, the run reports it, and the remaining tasks
        // still complete before the error is surfaced
        assert!(result.is_err());
        assert_eq!(counters.progress(), (5, 5));
        assert_eq!(counters.errors(), 1);
    }

    #[test]
    fn test_ratio() {
        let mut result = PipelineResult::new();
        result.bytes_in = 1000;
        result.bytes_out = 250;
        assert!((result.ratio() - 0.25).abs() < 1e-12);

        assert_eq!(PipelineResult::new().ratio(), 0.0);
    }
}
