//! Compression timing comparison
//!
//! A payload codec plus two execution modes over the same job list:
//! sequential baseline and queue-driven worker pool.

pub mod codec;
pub mod pipeline;

pub use codec::DeflateCodec;
pub use pipeline::{expand_jobs, run_queued, run_sequential, CompressJob, PipelineResult};
