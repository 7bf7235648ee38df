use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use galsim::io::{write_gal, GalData};
use galsim::particles::disk;

/// Writes a seeded rotating-disk galaxy as a `.gal` input file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of particles
    n: usize,
    /// Output `.gal` file
    output: PathBuf,
    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let result = disk(args.n, args.seed).and_then(|(particles, brightness)| {
        write_gal(&args.output, &GalData { particles, brightness })
    });

    match result {
        Ok(()) => {
            info!("Generated {} particles with seed {}", args.n, args.seed);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
