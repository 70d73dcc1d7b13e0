//! Monte Carlo estimation of pi by sampling the unit square.
//!
//! A sample `(x, y)` drawn uniformly from `[0, 1)²` is a hit when
//! `x² + y² <= 1`; the hit ratio approaches `pi / 4`. Results carry no
//! reproducibility guarantee unless a seed is configured.

mod types;
mod worker;

pub use types::{EstimatorConfig, MAX_WORKERS};

use std::time::Instant;

use crate::error::{Error, Result};

/// Serial and chunked-parallel pi estimator.
#[derive(Debug, Clone, Default)]
pub struct PiEstimator {
    config: EstimatorConfig,
}

impl PiEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Worker count for parallel runs; 0 selects one worker per CPU.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Draw every sample on the calling thread.
    pub fn estimate(&self, num_samples: u64) -> Result<f64> {
        ensure_samples(num_samples)?;

        let mut rng = self.config.rng_for(0);
        let hits = count_hits(&mut rng, num_samples);
        Ok(ratio(hits, num_samples))
    }

    /// Split the samples across worker threads and combine their hit counts
    /// once every worker has finished.
    pub fn estimate_parallel(&self, num_samples: u64) -> Result<f64> {
        ensure_samples(num_samples)?;

        let workers = self.config.effective_workers();
        ensure_workers(workers)?;
        let chunks = partition(num_samples, workers);
        let started = Instant::now();

        let results = worker::run_workers(&chunks, &self.config)?;
        let total_hits: u64 = results.iter().map(|r| r.hits).sum();
        debug_assert_eq!(results.iter().map(|r| r.samples).sum::<u64>(), num_samples);
        let estimate = ratio(total_hits, num_samples);

        tracing::debug!(
            workers,
            num_samples,
            total_hits,
            estimate,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "parallel pi estimate complete"
        );
        Ok(estimate)
    }
}

/// Serial estimate with fresh randomness.
pub fn estimate(num_samples: u64) -> Result<f64> {
    PiEstimator::new().estimate(num_samples)
}

/// Parallel estimate with fresh randomness. `None` or `Some(0)` workers
/// falls back to the number of available CPUs.
pub fn estimate_parallel(num_samples: u64, workers: Option<usize>) -> Result<f64> {
    PiEstimator::new()
        .with_workers(workers.unwrap_or(0))
        .estimate_parallel(num_samples)
}

/// Split `num_samples` into `workers` equal chunks; the remainder goes
/// entirely to the last chunk. A worker count of 0 is treated as 1.
///
/// One chunk is allocated per worker; [`PiEstimator::estimate_parallel`]
/// rejects counts above [`MAX_WORKERS`] before calling this.
pub fn partition(num_samples: u64, workers: usize) -> Vec<u64> {
    let workers = workers.max(1);
    let per_worker = num_samples / workers as u64;
    let remainder = num_samples % workers as u64;

    let mut chunks = vec![per_worker; workers];
    if let Some(last) = chunks.last_mut() {
        *last += remainder;
    }
    chunks
}

/// Validate a signed sample count from an outer boundary such as the CLI.
pub fn sample_count(value: i64) -> Result<u64> {
    if value < 0 {
        return Err(Error::InvalidArgument(format!(
            "sample count must not be negative, got {}",
            value
        )));
    }
    let count = value as u64;
    ensure_samples(count)?;
    Ok(count)
}

fn ensure_samples(num_samples: u64) -> Result<()> {
    if num_samples == 0 {
        return Err(Error::InvalidArgument(
            "sample count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn ensure_workers(workers: usize) -> Result<()> {
    if workers > MAX_WORKERS {
        return Err(Error::InvalidArgument(format!(
            "worker count must be at most {}, got {}",
            MAX_WORKERS, workers
        )));
    }
    Ok(())
}

pub(crate) fn count_hits(rng: &mut fastrand::Rng, samples: u64) -> u64 {
    let mut hits = 0;
    for _ in 0..samples {
        let x = rng.f64();
        let y = rng.f64();
        if x * x + y * y <= 1.0 {
            hits += 1;
        }
    }
    hits
}

fn ratio(hits: u64, num_samples: u64) -> f64 {
    4.0 * hits as f64 / num_samples as f64
}
