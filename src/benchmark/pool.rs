//! Static-partition worker pool
//!
//! Launches exactly W OS threads, each sweeping its assigned chunk of the
//! buffer, and blocks the caller until every worker has been joined. The
//! mutable variant hands each worker a disjoint `&mut` chunk obtained through
//! `split_at_mut`, so overlapping ranges cannot be expressed at all.
//!
//! The returned `Duration` covers spawn-to-last-join only; buffer
//! construction and result aggregation happen outside the clock.

use std::thread;
use std::time::{Duration, Instant};

use super::partition::partition;
use crate::utils::{BenchError, PartitionError, Result};

/// Fixed-size pool of sweep workers
pub struct StaticPool {
    workers: usize,
}

impl StaticPool {
    /// Create a pool; the worker count is validated up front
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(PartitionError::ZeroWorkers.into());
        }
        Ok(Self { workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `op` over disjoint mutable chunks of `buf`, one worker per chunk.
    ///
    /// `op` receives `(worker_id, base_index, chunk)` where `base_index` is
    /// the chunk's offset into the full buffer, so workers can derive global
    /// indices. Blocks until all workers have terminated; a worker failure or
    /// panic is surfaced only after every worker has been joined.
    pub fn run_mut<T, F>(&self, buf: &mut [T], op: F) -> Result<Duration>
    where
        T: Send,
        F: Fn(usize, usize, &mut [T]) -> Result<()> + Sync,
    {
        let ranges = partition(buf.len(), self.workers)?;

        let mut chunks: Vec<(usize, usize, &mut [T])> = Vec::with_capacity(self.workers);
        let mut rest = buf;
        for (id, range) in ranges.iter().enumerate() {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            chunks.push((id, range.start, head));
            rest = tail;
        }

        let start = Instant::now();
        let joined = thread::scope(|scope| {
            let op = &op;
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|(id, base, chunk)| {
                    thread::Builder::new()
                        .name(format!("sweep-worker-{}", id))
                        .spawn_scoped(scope, move || op(id, base, chunk))
                        .expect("Failed to spawn worker thread")
                })
                .collect();

            handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
        });
        let elapsed = start.elapsed();

        surface_failures(joined)?;
        Ok(elapsed)
    }

    /// Run `op` over disjoint shared views of `buf`, one worker per range.
    ///
    /// Same join and failure semantics as [`run_mut`](Self::run_mut).
    pub fn run_shared<T, F>(&self, buf: &[T], op: F) -> Result<Duration>
    where
        T: Sync,
        F: Fn(usize, usize, &[T]) -> Result<()> + Sync,
    {
        let ranges = partition(buf.len(), self.workers)?;

        let start = Instant::now();
        let joined = thread::scope(|scope| {
            let op = &op;
            let handles: Vec<_> = ranges
                .iter()
                .enumerate()
                .map(|(id, range)| {
                    let chunk = &buf[range.clone()];
                    let base = range.start;
                    thread::Builder::new()
                        .name(format!("sweep-worker-{}", id))
                        .spawn_scoped(scope, move || op(id, base, chunk))
                        .expect("Failed to spawn worker thread")
                })
                .collect();

            handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
        });
        let elapsed = start.elapsed();

        surface_failures(joined)?;
        Ok(elapsed)
    }
}

/// Surface the first worker failure after every worker has been joined
fn surface_failures(joined: Vec<thread::Result<Result<()>>>) -> Result<()> {
    let mut first_error = None;

    for outcome in joined {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
            Err(panic) => {
                if first_error.is_none() {
                    let msg = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "worker panicked".to_string());
                    first_error = Some(BenchError::Worker(msg));
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
