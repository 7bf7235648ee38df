//! Step driver: build tree, fork workers, join, discard tree, repeat.
//!
//! # Example
//!
//! ```
//! use galsim::particles::disk;
//! use galsim::simulation::Simulation;
//! use galsim::utils::SimulationConstants;
//!
//! let (particles, _) = disk(64, 1).expect("allocation failed");
//! let constants = SimulationConstants::new(64, 10, 1e-5, 0.25, 2);
//!
//! let mut sim = Simulation::new(particles, constants).expect("failed to create simulation");
//! let summary = sim.run().expect("simulation failed");
//! assert_eq!(summary.steps, 10);
//! ```
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::particles::{ParticleSet, QuadTree};
use crate::simulation::StepScheduler;
use crate::utils::{GalsimError, SimulationConstants};
#[cfg(feature = "graphics")]
use crate::graphics::{FramePacer, FrameSink};

/// Outcome of a run, reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub elapsed: Duration,
    /// Largest node count seen in any step's tree.
    pub peak_nodes: usize,
    /// Total mass seen at the root of the last tree built.
    pub root_mass: f64,
}

/// Per-step statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepStats {
    pub nodes: usize,
    pub depth: usize,
    pub root_mass: f64,
    pub elapsed: Duration,
}

/// Owns the particles for the duration of a run and advances them step by step.
pub struct Simulation {
    particles: ParticleSet,
    constants: SimulationConstants,
    scheduler: StepScheduler,
    steps_taken: usize,
    non_finite_reported: bool,
}

impl Simulation {
    /// Validates the inputs and prepares the worker pool.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the constants are unusable or do not match the particle count.
    /// - `InvalidMass` if any mass is non-positive or non-finite.
    /// - `ThreadPool` if the workers cannot be started.
    pub fn new(particles: ParticleSet, constants: SimulationConstants) -> Result<Self, GalsimError> {
        constants.validate()?;
        if particles.len() != constants.n {
            return Err(GalsimError::InvalidParameter(format!(
                "expected {} particles, got {}",
                constants.n,
                particles.len()
            )));
        }
        particles.validate_masses()?;
        let scheduler = StepScheduler::new(particles.len(), constants.n_threads)?;

        info!(
            "Simulating {} particles for {} steps: dt = {}, theta_max = {}, G = {}, eps0 = {}, {} workers",
            constants.n,
            constants.nsteps,
            constants.delta_t,
            constants.theta_max,
            constants.gravity,
            constants.epsilon,
            scheduler.workers()
        );

        Ok(Self {
            particles,
            constants,
            scheduler,
            steps_taken: 0,
            non_finite_reported: false,
        })
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn constants(&self) -> &SimulationConstants {
        &self.constants
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn workers(&self) -> usize {
        self.scheduler.workers()
    }

    /// Gives the particles back to the caller once the run is over.
    pub fn into_particles(self) -> ParticleSet {
        self.particles
    }

    /// Advances every particle by one time step.
    pub fn step(&mut self) -> StepStats {
        let started = Instant::now();
        let tree = QuadTree::build_with_depth(&self.particles, self.constants.max_depth);
        let stats = (tree.node_count(), tree.depth(), tree.root().mass);

        self.scheduler.advance(&mut self.particles, &tree, &self.constants);
        drop(tree);
        self.steps_taken += 1;

        if !self.non_finite_reported {
            if let Some(index) = self.particles.first_non_finite() {
                warn!(
                    "Particle {} has a non-finite position or velocity after step {}",
                    index, self.steps_taken
                );
                self.non_finite_reported = true;
            }
        }

        let elapsed = started.elapsed();
        debug!(
            "Step {}: {} nodes, depth {}, root mass {}, {:?}",
            self.steps_taken, stats.0, stats.1, stats.2, elapsed
        );
        StepStats { nodes: stats.0, depth: stats.1, root_mass: stats.2, elapsed }
    }

    /// Runs the configured number of steps without drawing.
    pub fn run(&mut self) -> Result<RunSummary, GalsimError> {
        self.run_steps(self.constants.nsteps, |_| Ok(()))
    }

    /// Runs the configured number of steps, handing each frame to `sink`.
    ///
    /// Each step is padded to the pacer's frame budget before the frame is drawn.
    #[cfg(feature = "graphics")]
    pub fn run_with_graphics<S: FrameSink>(
        &mut self,
        sink: &mut S,
        pacer: &FramePacer,
    ) -> Result<RunSummary, GalsimError> {
        sink.open()?;
        let summary = self.run_steps(self.constants.nsteps, |sim| {
            let slept = pacer.pace(sim.last_step_started);
            log::trace!("Frame {} (slept {:?})", sim.steps_taken, slept);
            sink.draw(&sim.particles.x, &sim.particles.y)
        });
        sink.close()?;
        summary
    }

    fn run_steps<F>(&mut self, steps: usize, mut after_step: F) -> Result<RunSummary, GalsimError>
    where
        F: FnMut(&StepView<'_>) -> Result<(), GalsimError>,
    {
        let started = Instant::now();
        let mut peak_nodes = 0;
        let mut root_mass = 0.0;

        for _ in 0..steps {
            let step_started = Instant::now();
            let stats = self.step();
            peak_nodes = peak_nodes.max(stats.nodes);
            root_mass = stats.root_mass;
            after_step(&StepView {
                particles: &self.particles,
                steps_taken: self.steps_taken,
                last_step_started: step_started,
            })?;
        }

        let summary = RunSummary {
            steps,
            elapsed: started.elapsed(),
            peak_nodes,
            root_mass,
        };
        info!(
            "Finished {} steps in {:?} (peak tree size {} nodes)",
            summary.steps, summary.elapsed, summary.peak_nodes
        );
        Ok(summary)
    }
}

/// Read-only state handed to the per-step callback.
#[cfg_attr(not(feature = "graphics"), allow(dead_code))]
struct StepView<'a> {
    particles: &'a ParticleSet,
    steps_taken: usize,
    last_step_started: Instant,
}
