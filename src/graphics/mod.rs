mod frame_sink;
mod frame_pacer;

pub use frame_sink::*;
pub use frame_pacer::*;
