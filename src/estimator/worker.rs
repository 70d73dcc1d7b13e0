//! Worker threads for parallel pi estimation
//!
//! One OS thread per chunk. Each worker owns its RNG and reports a single
//! `ChunkResult` on the result channel; nothing is shared while sampling.

use crossbeam_channel::Sender;
use std::io;
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};

use super::count_hits;
use super::types::{ChunkResult, EstimatorConfig};

/// Counts hits for one chunk of samples.
pub(crate) type Sampler = fn(&mut fastrand::Rng, u64) -> u64;

/// Starts the thread for one worker.
pub(crate) type Spawner = fn(usize, Box<dyn FnOnce() + Send>) -> io::Result<JoinHandle<()>>;

/// Run one worker per chunk and wait for all of them.
///
/// Every spawned thread is joined before the results are read back, so the
/// returned vector always covers all chunks.
pub(crate) fn run_workers(chunks: &[u64], config: &EstimatorConfig) -> Result<Vec<ChunkResult>> {
    run_workers_with(chunks, config, count_hits, spawn_named)
}

fn spawn_named(worker_id: usize, job: Box<dyn FnOnce() + Send>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("pi-worker-{}", worker_id))
        .spawn(job)
}

pub(crate) fn run_workers_with(
    chunks: &[u64],
    config: &EstimatorConfig,
    sampler: Sampler,
    spawn: Spawner,
) -> Result<Vec<ChunkResult>> {
    let (result_sender, result_receiver) = crossbeam_channel::unbounded();
    let mut handles = Vec::with_capacity(chunks.len());
    let mut spawn_error = None;

    for (worker_id, &samples) in chunks.iter().enumerate() {
        let sender = result_sender.clone();
        let rng = config.rng_for(worker_id);

        let job = Box::new(move || worker_thread(worker_id, samples, rng, sampler, sender));
        match spawn(worker_id, job) {
            Ok(handle) => handles.push((worker_id, handle)),
            Err(e) => {
                tracing::warn!(worker_id, error = %e, "failed to spawn pi worker");
                spawn_error = Some(Error::Spawn(e));
                break;
            }
        }
    }
    drop(result_sender);

    tracing::debug!(workers = handles.len(), "spawned pi workers");

    let mut panicked = None;
    for (worker_id, handle) in handles {
        if handle.join().is_err() && panicked.is_none() {
            panicked = Some(worker_id);
        }
    }

    if let Some(err) = spawn_error {
        return Err(err);
    }
    if let Some(worker_id) = panicked {
        return Err(Error::WorkerPanicked(worker_id));
    }

    let mut results: Vec<ChunkResult> = result_receiver.try_iter().collect();
    results.sort_by_key(|r| r.worker_id);

    tracing::debug!(results = results.len(), "joined pi workers");
    Ok(results)
}

fn worker_thread(
    worker_id: usize,
    samples: u64,
    mut rng: fastrand::Rng,
    sampler: Sampler,
    result_sender: Sender<ChunkResult>,
) {
    let hits = sampler(&mut rng, samples);
    tracing::trace!(worker_id, samples, hits, "pi worker finished");

    let result = ChunkResult {
        worker_id,
        samples,
        hits,
    };
    if result_sender.send(result).is_err() {
        tracing::warn!(worker_id, "pi result channel closed before worker finished");
    }
}
