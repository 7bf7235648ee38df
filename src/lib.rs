//! Barnes-Hut galaxy simulation on the unit square.
//!
//! Particles are bucketed into a quadtree every step, forces are approximated
//! through the tree and positions are advanced with a semi-implicit Euler step
//! split across a fixed number of workers.
pub mod utils;
pub mod particles;
pub mod simulation;
pub mod io;
#[cfg(feature = "graphics")]
pub mod graphics;

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}
