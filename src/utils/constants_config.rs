use crate::utils::{
    DEFAULT_EPSILON,
    DEFAULT_MAX_DEPTH,
    GRAVITY_NUMERATOR,
    errors::GalsimError
};

/// Immutable per-run inputs shared by every worker.
///
/// The struct is `Copy`; each worker task captures its own copy, so no
/// indirection or synchronization is involved in reading it.
///
/// # Examples
///
/// ```
/// use galsim::utils::SimulationConstants;
///
/// let constants = SimulationConstants::new(1000, 200, 1e-5, 0.25, 4);
/// assert_eq!(constants.gravity, 100.0 / 1000.0);
/// assert_eq!(constants.epsilon, 1e-3);
/// assert!(constants.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConstants {
    /// Number of particles.
    pub n: usize,
    /// Number of time steps to run.
    pub nsteps: usize,
    /// Time step.
    pub delta_t: f64,
    /// Multipole acceptance threshold.
    pub theta_max: f64,
    /// Requested worker count.
    pub n_threads: usize,
    /// Gravitational constant, derived as `100 / N`.
    pub gravity: f64,
    /// Plummer softening constant.
    pub epsilon: f64,
    /// Subdivision depth limit of the quadtree.
    pub max_depth: usize,
}

impl SimulationConstants {
    pub fn new(
        n: usize,
        nsteps: usize,
        delta_t: f64,
        theta_max: f64,
        n_threads: usize,
    ) -> Self {
        Self {
            n,
            nsteps,
            delta_t,
            theta_max,
            n_threads,
            gravity: GRAVITY_NUMERATOR / n as f64,
            epsilon: DEFAULT_EPSILON,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rejects parameter combinations the simulator cannot run with.
    pub fn validate(&self) -> Result<(), GalsimError> {
        if self.n == 0 {
            return Err(GalsimError::InvalidParameter("N must be at least 1".to_string()));
        }
        if self.n_threads == 0 {
            return Err(GalsimError::InvalidParameter("n_threads must be at least 1".to_string()));
        }
        if !(self.delta_t.is_finite() && self.delta_t > 0.0) {
            return Err(GalsimError::InvalidParameter(format!("delta_t must be positive, got {}", self.delta_t)));
        }
        if !(self.theta_max >= 0.0) {
            return Err(GalsimError::InvalidParameter(format!("theta_max must be non-negative, got {}", self.theta_max)));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(GalsimError::InvalidParameter(format!("epsilon must be non-negative, got {}", self.epsilon)));
        }
        Ok(())
    }
}
