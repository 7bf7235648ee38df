use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use log::info;

use galsim::io::{read_gal, write_gal, GalData};
use galsim::simulation::{RunSummary, Simulation};
use galsim::utils::{GalsimError, SimulationConstants, DEFAULT_EPSILON, DEFAULT_MAX_DEPTH, OUTPUT_FILE};

/// Barnes-Hut galaxy simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of particles in the input file
    n: usize,
    /// Input `.gal` file
    filename: PathBuf,
    /// Number of time steps
    nsteps: usize,
    /// Time step length
    delta_t: f64,
    /// Opening threshold; larger values approximate more aggressively
    theta_max: f64,
    /// Draw particles every step when non-zero
    graphics: u8,
    /// Number of worker threads
    n_threads: usize,

    /// Where to write the final state
    #[arg(long, default_value = OUTPUT_FILE)]
    output: PathBuf,
    /// Plummer softening constant
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,
    /// Deepest quadtree level before leaves start absorbing particles
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn parse_args() -> Result<Args, ExitCode> {
    Args::try_parse().map_err(|e| {
        if !e.use_stderr() {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        match e.kind() {
            ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument | ErrorKind::TooManyValues => {
                eprintln!("{}", GalsimError::Usage("Expected 7 input arguments".to_string()));
            }
            _ => {
                let _ = e.print();
            }
        }
        ExitCode::FAILURE
    })
}

fn run_simulation(sim: &mut Simulation, graphics: bool) -> Result<RunSummary, GalsimError> {
    if !graphics {
        return sim.run();
    }
    run_with_canvas(sim)
}

#[cfg(feature = "graphics")]
fn run_with_canvas(sim: &mut Simulation) -> Result<RunSummary, GalsimError> {
    use galsim::graphics::{AsciiCanvas, FramePacer};
    use galsim::utils::{CANVAS_HEIGHT, CANVAS_WIDTH};

    let stdout = std::io::stdout().lock();
    let mut canvas = AsciiCanvas::new(stdout, CANVAS_WIDTH, CANVAS_HEIGHT);
    sim.run_with_graphics(&mut canvas, &FramePacer::default())
}

#[cfg(not(feature = "graphics"))]
fn run_with_canvas(_sim: &mut Simulation) -> Result<RunSummary, GalsimError> {
    Err(GalsimError::Usage(
        "graphics requested but this build has no graphics support".to_string(),
    ))
}

fn run(args: Args) -> Result<(), GalsimError> {
    let input = read_gal(&args.filename, args.n)?;
    let brightness = input.brightness;

    let constants = SimulationConstants::new(args.n, args.nsteps, args.delta_t, args.theta_max, args.n_threads)
        .with_epsilon(args.epsilon)
        .with_max_depth(args.max_depth);

    let mut sim = Simulation::new(input.particles, constants)?;
    let summary = run_simulation(&mut sim, args.graphics != 0)?;
    info!("Root mass after the last step: {}", summary.root_mass);

    let output = GalData { particles: sim.into_particles(), brightness };
    write_gal(&args.output, &output)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
