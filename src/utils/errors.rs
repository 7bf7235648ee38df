use std::fmt;
use std::error::Error;

/// Represents errors that can occur while loading, simulating or writing a galaxy.
#[derive(Debug, Clone)]
pub enum GalsimError {
    /// Wrong number of command-line arguments or an argument that could not be parsed.
    Usage(String),
    /// The input file could not be opened or read.
    InputFile(String),
    /// The input file does not hold exactly `6 * N` doubles.
    InputSize { expected: u64, actual: u64 },
    /// The output file could not be created or written.
    OutputFile(String),
    /// Particle storage could not be allocated.
    Allocation(String),
    /// A particle was loaded with a non-positive or non-finite mass.
    InvalidMass { index: usize, mass: f64 },
    /// A simulation parameter is outside its valid range.
    InvalidParameter(String),
    /// The worker pool could not be created.
    ThreadPool(String),
    /// A frame could not be drawn.
    Render(String),
}

impl fmt::Display for GalsimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GalsimError::Usage(msg) => write!(f, "Input error: {}", msg),
            GalsimError::InputFile(msg) => write!(f, "Failed to read input file: {}", msg),
            GalsimError::InputSize { expected, actual } => write!(
                f,
                "Input file size is not as expected (expected {} bytes, found {}). Is N correct?",
                expected, actual
            ),
            GalsimError::OutputFile(msg) => write!(f, "Failed to write output file: {}", msg),
            GalsimError::Allocation(msg) => write!(f, "Allocation failure: {}", msg),
            GalsimError::InvalidMass { index, mass } => {
                write!(f, "Invalid mass {} for particle {}", mass, index)
            }
            GalsimError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            GalsimError::ThreadPool(msg) => write!(f, "Failed to start worker pool: {}", msg),
            GalsimError::Render(msg) => write!(f, "Graphics error: {}", msg),
        }
    }
}

impl Error for GalsimError {}
