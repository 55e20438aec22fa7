// src/bin/beta_scan.rs - Final thermal energy as a function of beta

use clap::Parser;
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use ising::config::SimulationConfig;
use ising::sampler::EnergyEvaluation;
use ising::thermalize::{ThermalizationDriver, ThermalizationOutcome};
use ising::utils::rng::replica_rng;
use ising::{Lattice, Spin};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
struct Cli {
    /// Lattice width
    #[arg(long, default_value = "5")]
    width: usize,

    /// Lattice height
    #[arg(long, default_value = "5")]
    height: usize,

    /// Ground state spin
    #[arg(long, default_value = "down")]
    ground: Spin,

    /// Beta range (min,max,step)
    #[arg(long, default_value = "0.0,1.0,0.1", value_delimiter = ',')]
    beta_range: Vec<f64>,

    /// Consecutive unchanged-energy iterations to stop a replica
    #[arg(long, default_value = "3")]
    hits: usize,

    /// Number of replicas per beta
    #[arg(long, default_value = "10")]
    replicas: usize,

    /// Per-replica iteration cap
    #[arg(long, default_value = "100000")]
    max_iterations: u64,

    /// Master seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Output file
    #[arg(long, default_value = "beta_scan.csv")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Welford online stats.
#[derive(Default, Clone)]
struct OnlineStats {
    n:    u64,
    mean: f64,
    m2:   f64,
}
impl OnlineStats {
    fn push(&mut self, x: f64) {
        self.n += 1;
        let delta  = x - self.mean;
        self.mean += delta / self.n as f64;
        let delta2 = x - self.mean;
        self.m2   += delta * delta2;
    }
    fn mean(&self) -> f64 { self.mean }
    fn var(&self)  -> f64 { if self.n > 1 { self.m2 / (self.n - 1) as f64 } else { 0.0 } }
    fn std(&self)  -> f64 { self.var().sqrt() }
}

fn beta_values(range: &[f64]) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    let &[min, max, step] = range else {
        return Err(format!("--beta-range needs min,max,step, got {} values", range.len()).into());
    };
    if !(step > 0.0) {
        return Err(format!("beta step must be > 0, got {step}").into());
    }
    let mut betas = Vec::new();
    let mut beta = min;
    while beta <= max + 1e-10 {
        betas.push(beta);
        beta += step;
    }
    Ok(betas)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let level = args
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let betas = beta_values(&args.beta_range)?;
    for &beta in &betas {
        SimulationConfig {
            width: args.width,
            height: args.height,
            ground_state: args.ground,
            beta,
            max_consequential_hits: args.hits,
            seed: Some(args.seed),
            max_iterations: Some(args.max_iterations),
            evaluation: EnergyEvaluation::LocalDelta,
        }
        .validate()?;
    }
    info!(n_beta = betas.len(), replicas = args.replicas, "starting scan");

    let bar = ProgressBar::new((betas.len() * args.replicas) as u64);
    bar.set_style(ProgressStyle::with_template(
        " {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]",
    )?);

    let mut wtr = WriterBuilder::new().from_path(&args.output)?;
    wtr.write_record(["beta", "mean_energy", "std_energy", "mean_iterations", "unconverged"])?;

    for (b_idx, &beta) in betas.iter().enumerate() {
        let mut stats_e    = OnlineStats::default();
        let mut stats_iter = OnlineStats::default();
        let mut unconverged = 0usize;

        for rep in 0..args.replicas {
            let mut rng = replica_rng(args.seed, b_idx * args.replicas + rep);
            let mut lattice = Lattice::new(args.width, args.height, args.ground)?;

            let report = ThermalizationDriver::new(beta, args.hits)
                .with_evaluation(EnergyEvaluation::LocalDelta)
                .with_iteration_cap(args.max_iterations)
                .run(&mut lattice, &mut rng)?;

            if report.outcome == ThermalizationOutcome::IterationCapReached {
                warn!(beta, replica = rep, "replica hit the iteration cap");
                unconverged += 1;
            }
            stats_e.push(report.final_energy as f64);
            stats_iter.push(report.iterations as f64);
            bar.inc(1);
        }

        wtr.write_record(&[
            beta.to_string(),
            stats_e.mean().to_string(),
            stats_e.std().to_string(),
            stats_iter.mean().to_string(),
            unconverged.to_string(),
        ])?;
    }
    bar.finish();
    wtr.flush()?;

    println!("Scan complete → {}", args.output.display());
    Ok(())
}
