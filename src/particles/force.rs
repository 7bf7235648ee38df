//! Softened gravitational acceleration from a quadtree or by direct summation.
//!
//! Both paths use the same pairwise term
//!
//! ```text
//! a += m * r / (|r| + eps0)^3,     r = p - com
//! ```
//!
//! with the softening added to the distance before cubing. The returned
//! vector points away from the attracting mass; the integrator applies
//! `-G` when it kicks the velocity. No term is excluded for the particle's
//! own contribution: at `r = 0` the numerator vanishes.
use crate::particles::{ParticleSet, QuadNode, QuadTree};

/// Contribution of a point mass `mass` at `(com_x, com_y)` to the accumulator.
#[inline]
pub fn softened_term(x: f64, y: f64, com_x: f64, com_y: f64, mass: f64, eps0: f64, acc: &mut (f64, f64)) {
    let r_x = x - com_x;
    let r_y = y - com_y;
    let r = (r_x * r_x + r_y * r_y).sqrt();
    accumulate(r_x, r_y, r, mass, eps0, acc);
}

#[inline]
fn accumulate(r_x: f64, r_y: f64, r: f64, mass: f64, eps0: f64, acc: &mut (f64, f64)) {
    let denom = r + eps0;
    let denom = 1.0 / (denom * denom * denom);
    acc.0 += mass * r_x * denom;
    acc.1 += mass * r_y * denom;
}

impl QuadTree {
    /// Barnes-Hut acceleration term at `(x, y)`.
    ///
    /// An interior node is opened when its side exceeds `theta_max` times the
    /// distance to its center of mass; otherwise (and for every leaf) its
    /// aggregate is used as a single body. `theta_max = 0` opens every
    /// interior node and reproduces the direct sum.
    ///
    /// # Examples
    ///
    /// ```
    /// use galsim::particles::{ParticleSet, QuadTree};
    ///
    /// let mut set = ParticleSet::default();
    /// set.push(0.25, 0.5, 1.0, 0.0, 0.0);
    /// set.push(0.75, 0.5, 1.0, 0.0, 0.0);
    /// let tree = QuadTree::build(&set);
    ///
    /// // Symmetric pull on the midpoint cancels.
    /// let (ax, ay) = tree.acceleration(0.5, 0.5, 0.0, 1e-3);
    /// assert!(ax.abs() < 1e-12 && ay.abs() < 1e-12);
    /// ```
    pub fn acceleration(&self, x: f64, y: f64, theta_max: f64, eps0: f64) -> (f64, f64) {
        let mut acc = (0.0, 0.0);
        self.accumulate_from(self.root(), x, y, theta_max, eps0, &mut acc);
        acc
    }

    fn accumulate_from(&self, node: &QuadNode, x: f64, y: f64, theta_max: f64, eps0: f64, acc: &mut (f64, f64)) {
        // Empty leaves would only add +0.0.
        if node.is_empty() {
            return;
        }
        let r_x = x - node.com_x;
        let r_y = y - node.com_y;
        let r = (r_x * r_x + r_y * r_y).sqrt();

        match self.children(node) {
            Some(children) if node.quad.side() > theta_max * r => {
                for child in children {
                    self.accumulate_from(child, x, y, theta_max, eps0, acc);
                }
            }
            _ => accumulate(r_x, r_y, r, node.mass, eps0, acc),
        }
    }

    /// Number of nodes treated as single bodies for a query at `(x, y)`.
    pub fn interaction_count(&self, x: f64, y: f64, theta_max: f64) -> usize {
        self.count_from(self.root(), x, y, theta_max)
    }

    fn count_from(&self, node: &QuadNode, x: f64, y: f64, theta_max: f64) -> usize {
        if node.is_empty() {
            return 0;
        }
        let r_x = x - node.com_x;
        let r_y = y - node.com_y;
        let r = (r_x * r_x + r_y * r_y).sqrt();
        match self.children(node) {
            Some(children) if node.quad.side() > theta_max * r => {
                children.iter().map(|c| self.count_from(c, x, y, theta_max)).sum()
            }
            _ => 1,
        }
    }
}

/// Exact O(N) acceleration term at `(x, y)` from every particle in the set.
pub fn direct_acceleration(particles: &ParticleSet, x: f64, y: f64, eps0: f64) -> (f64, f64) {
    let mut acc = (0.0, 0.0);
    for j in 0..particles.len() {
        softened_term(x, y, particles.x[j], particles.y[j], particles.mass[j], eps0, &mut acc);
    }
    acc
}

/// Exact accelerations for every particle, O(N²).
pub fn direct_accelerations(particles: &ParticleSet, eps0: f64) -> Vec<(f64, f64)> {
    (0..particles.len())
        .map(|i| direct_acceleration(particles, particles.x[i], particles.y[i], eps0))
        .collect()
}

/// Barnes-Hut accelerations for every particle against a prebuilt tree.
pub fn tree_accelerations(tree: &QuadTree, particles: &ParticleSet, theta_max: f64, eps0: f64) -> Vec<(f64, f64)> {
    (0..particles.len())
        .map(|i| tree.acceleration(particles.x[i], particles.y[i], theta_max, eps0))
        .collect()
}
