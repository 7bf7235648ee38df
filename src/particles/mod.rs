mod particle_set;
mod quadtree;
mod force;
mod integrator;
mod initial_conditions;

pub use particle_set::*;
pub use quadtree::*;
pub use force::*;
pub use integrator::*;
pub use initial_conditions::*;

#[cfg(test)]
mod force_tests;
