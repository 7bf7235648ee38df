//! Division of the particle index space across workers.
use std::ops::Range;

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::particles::{advance_chunk, ParticleSet, QuadTree};
use crate::utils::{GalsimError, SimulationConstants};

/// Splits `0..n` into contiguous, non-overlapping ranges, one per worker.
///
/// Every worker but the last gets `n / workers` indices; the last one also
/// absorbs the remainder. The worker count is reduced to `n` when there are
/// fewer particles than threads, so no range is ever empty. `n == 0` yields
/// no ranges.
///
/// # Examples
///
/// ```
/// use galsim::simulation::partition;
///
/// assert_eq!(partition(10, 3), vec![0..3, 3..6, 6..10]);
/// assert_eq!(partition(2, 8), vec![0..1, 1..2]);
/// ```
pub fn partition(n: usize, n_threads: usize) -> Vec<Range<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let workers = n_threads.clamp(1, n);
    let work_size = n / workers;
    let leftover = n % workers;

    (0..workers)
        .map(|j| {
            if j + 1 == workers {
                n - work_size - leftover..n
            } else {
                j * work_size..(j + 1) * work_size
            }
        })
        .collect()
}

/// Fork-join dispatcher: one task per index range per step, joined before returning.
pub struct StepScheduler {
    pool: ThreadPool,
    ranges: Vec<Range<usize>>,
}

impl StepScheduler {
    /// Creates a pool with exactly one thread per non-empty range.
    pub fn new(n: usize, n_threads: usize) -> Result<Self, GalsimError> {
        let ranges = partition(n, n_threads);
        let pool = ThreadPoolBuilder::new()
            .num_threads(ranges.len().max(1))
            .thread_name(|i| format!("galsim-worker-{}", i))
            .build()
            .map_err(|e| GalsimError::ThreadPool(e.to_string()))?;
        debug!("Scheduler: {} particles over {} workers {:?}", n, ranges.len(), ranges);
        Ok(Self { pool, ranges })
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    pub fn workers(&self) -> usize {
        self.ranges.len()
    }

    /// Runs force evaluation and integration for every particle against `tree`.
    ///
    /// Each task owns the position/velocity slots of its range only and
    /// shares the tree read-only. Returns once every task has finished.
    ///
    /// # Panics
    ///
    /// Panics if `particles` does not have the length the scheduler was built for.
    pub fn advance(&self, particles: &mut ParticleSet, tree: &QuadTree, constants: &SimulationConstants) {
        let chunks = particles.split_ranges_mut(&self.ranges);
        let constants = *constants;
        self.pool.scope(|s| {
            for mut chunk in chunks {
                s.spawn(move |_| advance_chunk(&mut chunk, tree, &constants));
            }
        });
    }
}
