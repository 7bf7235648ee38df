use crate::particles::{ParticleChunk, QuadTree};
use crate::utils::SimulationConstants;

/// Semi-implicit Euler update of one particle.
///
/// The velocity is kicked first with this step's acceleration term, then the
/// position drifts with the *updated* velocity. `G` enters here with a minus
/// sign; combined with `r = p - com` in the force term this makes gravity
/// attractive.
///
/// # Examples
///
/// ```
/// use galsim::particles::kick_drift;
///
/// let (mut x, mut y, mut vx, mut vy) = (0.5, 0.5, 0.0, 0.0);
/// kick_drift(&mut x, &mut y, &mut vx, &mut vy, (1.0, 0.0), 2.0, 0.1);
/// assert_eq!(vx, -0.2);
/// assert!((x - 0.48).abs() < 1e-15);
/// assert_eq!(y, 0.5);
/// ```
#[inline]
pub fn kick_drift(
    x: &mut f64,
    y: &mut f64,
    vx: &mut f64,
    vy: &mut f64,
    accel: (f64, f64),
    gravity: f64,
    delta_t: f64,
) {
    *vx += -gravity * delta_t * accel.0;
    *vy += -gravity * delta_t * accel.1;
    *x += delta_t * *vx;
    *y += delta_t * *vy;
}

/// Advances every particle of `chunk` by one step against a read-only tree.
///
/// Each particle only reads its own prior position and the tree, so chunks
/// can run concurrently.
pub fn advance_chunk(chunk: &mut ParticleChunk<'_>, tree: &QuadTree, constants: &SimulationConstants) {
    let gravity = constants.gravity;
    let delta_t = constants.delta_t;
    let theta_max = constants.theta_max;
    let eps0 = constants.epsilon;

    for i in 0..chunk.len() {
        let accel = tree.acceleration(chunk.x[i], chunk.y[i], theta_max, eps0);
        kick_drift(
            &mut chunk.x[i],
            &mut chunk.y[i],
            &mut chunk.vx[i],
            &mut chunk.vy[i],
            accel,
            gravity,
            delta_t,
        );
    }
}
