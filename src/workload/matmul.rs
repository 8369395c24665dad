//! Matrix-multiply cache effects
//!
//! Times square matrix multiplication in three variants: the naive triple
//! loop, a cache-blocked multiply, and a row-partitioned multithreaded
//! multiply over the static pool. Growing sizes push the working set out of
//! successive cache levels.

use tracing::debug;

use crate::benchmark::{time_phase, StaticPool};
use crate::config::BenchConfig;
use crate::metrics::Measurement;
use crate::utils::Result;

/// Square row-major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    pub fn random(n: usize, rng: &mut fastrand::Rng) -> Self {
        Self {
            n,
            data: (0..n * n).map(|_| rng.f64()).collect(),
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    #[inline]
    fn at_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.data[i * self.n + j]
    }
}

/// Naive triple loop (i, j, k) — strides through B column-wise
pub fn multiply_naive(a: &Matrix, b: &Matrix) -> Matrix {
    let n = a.n;
    let mut c = Matrix::zeros(n);

    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..n {
                acc += a.at(i, k) * b.at(k, j);
            }
            *c.at_mut(i, j) = acc;
        }
    }

    c
}

/// Cache-blocked multiply with a fixed block edge
pub fn multiply_blocked(a: &Matrix, b: &Matrix, block: usize) -> Matrix {
    let n = a.n;
    let mut c = Matrix::zeros(n);

    for ii in (0..n).step_by(block) {
        for kk in (0..n).step_by(block) {
            for jj in (0..n).step_by(block) {
                let i_end = (ii + block).min(n);
                let k_end = (kk + block).min(n);
                let j_end = (jj + block).min(n);

                for i in ii..i_end {
                    for k in kk..k_end {
                        let aik = a.at(i, k);
                        for j in jj..j_end {
                            *c.at_mut(i, j) += aik * b.at(k, j);
                        }
                    }
                }
            }
        }
    }

    c
}

/// Row-partitioned multithreaded multiply.
///
/// The result's rows are the partitioned buffer: each worker owns a disjoint
/// row band and reads A and B shared. Returns the result together with the
/// timed spawn-to-join interval.
pub fn multiply_threaded(
    a: &Matrix,
    b: &Matrix,
    pool: &StaticPool,
) -> Result<(Matrix, std::time::Duration)> {
    let n = a.n;
    let mut c = Matrix::zeros(n);

    let elapsed = {
        let mut rows: Vec<&mut [f64]> = c.data.chunks_mut(n.max(1)).collect();
        pool.run_mut(&mut rows, |_, base, band| {
            for (offset, row) in band.iter_mut().enumerate() {
                let i = base + offset;
                for k in 0..n {
                    let aik = a.at(i, k);
                    for j in 0..n {
                        row[j] += aik * b.at(k, j);
                    }
                }
            }
            Ok(())
        })?
    };

    Ok((c, elapsed))
}

pub fn run(config: &BenchConfig) -> Result<Vec<Measurement>> {
    let seed = if config.seed == 0 {
        fastrand::u64(..)
    } else {
        config.seed
    };
    let mut rng = fastrand::Rng::with_seed(seed);

    let pool = StaticPool::new(config.workers)?;
    let mut out = Vec::with_capacity(config.matrix_sizes.len() * 3);

    for &n in &config.matrix_sizes {
        let a = Matrix::random(n, &mut rng);
        let b = Matrix::random(n, &mut rng);

        let (c_naive, elapsed) = time_phase(|| multiply_naive(&a, &b));
        out.push(Measurement::new(
            format!("matmul n={} naive", n),
            elapsed.as_secs_f64(),
            "s",
        ));

        let (c_blocked, elapsed) = time_phase(|| multiply_blocked(&a, &b, config.block_size));
        out.push(Measurement::new(
            format!("matmul n={} blocked", n),
            elapsed.as_secs_f64(),
            "s",
        ));

        let (c_threaded, elapsed) = multiply_threaded(&a, &b, &pool)?;
        out.push(Measurement::new(
            format!("matmul n={} threads={}", n, pool.workers()),
            elapsed.as_secs_f64(),
            "s",
        ));

        debug!(n, "matmul variants complete");
        std::hint::black_box((&c_naive, &c_blocked, &c_threaded));
    }

    Ok(out)
}
