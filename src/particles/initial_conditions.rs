//! Synthetic starting states for test runs and benchmarks.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::particles::ParticleSet;
use crate::utils::GalsimError;

/// Radius of the generated disk, in domain units.
pub const DISK_RADIUS: f64 = 0.25;

/// Angular speed of the generated disk's rigid rotation.
pub const DISK_ROTATION: f64 = 0.5;

/// A seeded rotating disk galaxy centred in the unit square.
///
/// Positions are uniform over the disk, masses uniform in `[0.5, 1.5] / n`,
/// velocities tangential with magnitude proportional to the radius, and
/// brightness uniform in `[0, 1)`. Returns the particles and the brightness column.
///
/// # Examples
///
/// ```
/// use galsim::particles::disk;
///
/// let (set, brightness) = disk(100, 7).expect("allocation failed");
/// assert_eq!(set.len(), 100);
/// assert_eq!(brightness.len(), 100);
/// assert!(set.validate_masses().is_ok());
/// ```
pub fn disk(n: usize, seed: u64) -> Result<(ParticleSet, Vec<f64>), GalsimError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = ParticleSet::with_capacity(n)?;
    let mut brightness = Vec::new();
    brightness
        .try_reserve_exact(n)
        .map_err(|e| GalsimError::Allocation(format!("{} brightness values: {}", n, e)))?;

    for _ in 0..n {
        // sqrt keeps the areal density uniform.
        let radius = DISK_RADIUS * rng.random::<f64>().sqrt();
        let angle = rng.random_range(0.0..2.0 * PI);
        let (sin, cos) = angle.sin_cos();
        let mass = rng.random_range(0.5..1.5) / n as f64;
        let speed = DISK_ROTATION * radius;
        set.push(
            0.5 + radius * cos,
            0.5 + radius * sin,
            mass,
            -speed * sin,
            speed * cos,
        );
        brightness.push(rng.random::<f64>());
    }
    Ok((set, brightness))
}

/// Two equal masses mirrored about the domain center, at rest.
pub fn mirrored_pair(offset: f64, mass: f64) -> ParticleSet {
    let mut set = ParticleSet::default();
    set.push(0.5 - offset, 0.5 - offset, mass, 0.0, 0.0);
    set.push(0.5 + offset, 0.5 + offset, mass, 0.0, 0.0);
    set
}
