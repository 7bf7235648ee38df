use std::time::Duration;

/// Numerator of the run's gravitational constant, `G = GRAVITY_NUMERATOR / N`.
pub const GRAVITY_NUMERATOR: f64 = 100.0;

/// Plummer sphere constant added to the separation before cubing.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Deepest level the quadtree subdivides to. At this depth a node spans
/// roughly 1.8e-15 of the unit domain, close to f64 resolution around 1.0.
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// File the final particle state is written to unless overridden.
pub const OUTPUT_FILE: &str = "result.gal";

/// Number of doubles stored per particle in a `.gal` file.
pub const GAL_FIELDS_PER_PARTICLE: usize = 6;

pub const GRAPHICS_FPS: u32 = 30;

pub const FRAME_BUDGET: Duration = Duration::from_nanos(1_000_000_000 / GRAPHICS_FPS as u64);

/// Character grid used by the terminal renderer.
pub const CANVAS_WIDTH: usize = 80;
pub const CANVAS_HEIGHT: usize = 40;
