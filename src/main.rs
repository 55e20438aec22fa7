//! Thermalize a spin lattice from its ground state and print both states
//! (see `SimulationConfig` for all run parameters).

use clap::Parser;
use csv::Writer;
use indicatif::{ProgressBar, ProgressStyle};
use ising::config::SimulationConfig;
use ising::energy::energy;
use ising::render::write_lattice;
use ising::sampler::EnergyEvaluation;
use ising::thermalize::{ThermalizationDriver, ThermalizationOutcome};
use ising::{Lattice, Spin};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ising", version, about = "Full-enumeration spin-flip thermalization")]
struct Cli {
    /// Lattice extent along x (number of printed rows).
    ///
    /// Flip weights are raw exp(-beta * E) with E up to 4 * width * height;
    /// once beta * 4 * width * height exceeds about 700 (e.g. 20x20 at
    /// beta = 1) they under/overflow and the run stops with an error.
    #[arg(long, default_value_t = 5)]
    width: usize,

    /// Lattice extent along y (characters per printed row)
    #[arg(long, default_value_t = 5)]
    height: usize,

    /// Uniform spin of the starting configuration (up or down)
    #[arg(long, default_value = "down")]
    ground: Spin,

    /// Inverse temperature.
    ///
    /// Keep beta * 4 * width * height below about 700, beyond that the flip
    /// weights leave the f64 range and the run fails.
    #[arg(long, default_value_t = 1.0)]
    beta: f64,

    /// Consecutive unchanged-energy iterations required to stop
    #[arg(long, default_value_t = 3)]
    hits: usize,

    /// RNG seed (drawn from OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many iterations
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Evaluate candidate flips from the local energy change
    #[arg(long, default_value_t = false)]
    local_delta: bool,

    /// Write per-iteration energies to this CSV file
    #[arg(long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            width: self.width,
            height: self.height,
            ground_state: self.ground,
            beta: self.beta,
            max_consequential_hits: self.hits,
            seed: self.seed,
            max_iterations: self.max_iterations,
            evaluation: if self.local_delta {
                EnergyEvaluation::LocalDelta
            } else {
                EnergyEvaluation::FullRecompute
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cfg = cli.config();
    cfg.validate()?;
    tracing::debug!("Configuration:\n{cfg:#?}");

    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding generator");
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let mut lattice = Lattice::new(cfg.width, cfg.height, cfg.ground_state)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Lattice at the ground state:")?;
    write_lattice(&lattice, &mut out)?;
    writeln!(out, "Energy: {}", energy(&lattice))?;
    out.flush()?;

    let mut driver = ThermalizationDriver::new(cfg.beta, cfg.max_consequential_hits)
        .with_evaluation(cfg.evaluation);
    if let Some(cap) = cfg.max_iterations {
        driver = driver.with_iteration_cap(cap);
    }

    let mut trace = match &cli.trace {
        Some(path) => {
            let mut wtr = Writer::from_path(path)?;
            wtr.write_record(["iteration", "energy", "consequential_hits", "x", "y"])?;
            Some(wtr)
        }
        None => None,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template(" {spinner} {msg} [{elapsed_precise}]")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut trace_err: Option<csv::Error> = None;
    let report = driver.run_with(&mut lattice, &mut rng, |rec| {
        if rec.iteration % 64 == 0 {
            spinner.set_message(format!("iteration {} energy {}", rec.iteration, rec.energy));
        }
        if trace_err.is_some() {
            return;
        }
        if let Some(wtr) = trace.as_mut() {
            let row = [
                rec.iteration.to_string(),
                rec.energy.to_string(),
                rec.consequential_hits.to_string(),
                rec.flipped.x.to_string(),
                rec.flipped.y.to_string(),
            ];
            if let Err(e) = wtr.write_record(&row) {
                trace_err = Some(e);
            }
        }
    })?;
    spinner.finish_and_clear();

    if let Some(e) = trace_err {
        return Err(e.into());
    }
    if let Some(mut wtr) = trace {
        wtr.flush()?;
    }

    info!(
        iterations = report.iterations,
        fallback_flips = report.fallback_flips,
        "evolution finished"
    );
    if report.outcome == ThermalizationOutcome::IterationCapReached {
        writeln!(out, "Stopped after {} iterations without convergence", report.iterations)?;
    }

    writeln!(out, "Lattice at the thermal state:")?;
    write_lattice(&lattice, &mut out)?;
    writeln!(out, "Energy: {}", energy(&lattice))?;

    lattice.deallocate();
    Ok(())
}
