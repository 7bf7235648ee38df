use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use galsim::io::{max_position_deviation, read_gal};
use galsim::utils::GalsimError;

/// Reports the largest position difference between two `.gal` files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of particles in each file
    n: usize,
    first: PathBuf,
    second: PathBuf,
}

fn compare(args: &Args) -> Result<f64, GalsimError> {
    let a = read_gal(&args.first, args.n)?;
    let b = read_gal(&args.second, args.n)?;
    max_position_deviation(&a.particles, &b.particles)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match compare(&args) {
        Ok(deviation) => {
            println!("pos_maxdiff = {:.16e}", deviation);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
