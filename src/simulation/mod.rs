mod scheduler;
mod simulation;

pub use scheduler::*;
pub use simulation::*;
