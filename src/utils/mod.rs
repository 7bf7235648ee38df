pub mod constants;
pub mod constants_config;
pub mod errors;

pub use constants::*;
pub use constants_config::*;
pub use errors::*;

#[cfg(test)]
mod constants_config_tests;
