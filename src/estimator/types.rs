//! Configuration and per-worker result types for pi estimation.

/// Upper bound on worker threads for one parallel estimate.
pub const MAX_WORKERS: usize = 1024;

/// How an estimator splits and seeds its work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Worker threads for parallel runs; 0 means one per available CPU
    /// (capped at [`MAX_WORKERS`]).
    pub workers: usize,
    /// Fixed seed for reproducible runs. Worker `i` draws from `seed + i`.
    pub seed: Option<u64>,
}

impl EstimatorConfig {
    /// Get effective worker count with defaults
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().min(MAX_WORKERS)
        } else {
            self.workers
        }
    }

    pub(crate) fn rng_for(&self, worker_id: usize) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(worker_id as u64)),
            None => fastrand::Rng::new(),
        }
    }
}

/// Hit count reported by one worker after sampling its chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkResult {
    pub worker_id: usize,
    pub samples: u64,
    pub hits: u64,
}
