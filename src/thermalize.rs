//! Drives the sampler until the total energy plateaus.

use crate::energy::energy;
use crate::error::Result;
use crate::lattice::Lattice;
use crate::random::RandomSource;
use crate::sampler::{EnergyEvaluation, FlipOutcome, SpinFlipSampler};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Converged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalizationOutcome {
    /// Energy stayed unchanged for `max_consequential_hits` iterations in a row.
    Converged,
    /// The caller's iteration cap ended the run first.
    IterationCapReached,
}

/// Passed to the observer after every iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    /// 1-based iteration count.
    pub iteration: u64,
    pub energy: i64,
    pub consequential_hits: usize,
    pub flipped: FlipOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalizationReport {
    pub outcome: ThermalizationOutcome,
    pub iterations: u64,
    pub initial_energy: i64,
    pub final_energy: i64,
    /// Steps that hit the rounding fallback in the sampler.
    pub fallback_flips: u64,
}

/// Repeats single flips until the energy stops changing.
///
/// Before each iteration the counter of consecutive unchanged-energy
/// iterations is compared with `max_consequential_hits`; the run stops as
/// soon as it has reached the threshold. A threshold of 0 therefore performs
/// no iteration at all. There is no built-in bound on the number of
/// iterations unless one is set with [`with_iteration_cap`](Self::with_iteration_cap).
#[derive(Debug, Clone)]
pub struct ThermalizationDriver {
    beta: f64,
    max_consequential_hits: usize,
    evaluation: EnergyEvaluation,
    iteration_cap: Option<u64>,
    state: DriverState,
}

impl ThermalizationDriver {
    pub fn new(beta: f64, max_consequential_hits: usize) -> Self {
        Self {
            beta,
            max_consequential_hits,
            evaluation: EnergyEvaluation::default(),
            iteration_cap: None,
            state: DriverState::Running,
        }
    }

    pub fn with_evaluation(mut self, evaluation: EnergyEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Stop after `cap` iterations even without a plateau.
    pub fn with_iteration_cap(mut self, cap: u64) -> Self {
        self.iteration_cap = Some(cap);
        self
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn run(&mut self, lattice: &mut Lattice, rng: &mut impl RandomSource) -> Result<ThermalizationReport> {
        self.run_with(lattice, rng, |_| {})
    }

    /// Like [`run`](Self::run), calling `observer` after every iteration.
    pub fn run_with<F>(
        &mut self,
        lattice: &mut Lattice,
        rng: &mut impl RandomSource,
        mut observer: F,
    ) -> Result<ThermalizationReport>
    where
        F: FnMut(&IterationRecord),
    {
        self.state = DriverState::Running;

        let mut sampler = SpinFlipSampler::with_evaluation(lattice, self.evaluation)?;
        let initial_energy = energy(lattice);
        let mut current = initial_energy;
        let mut hits = 0usize;
        let mut iterations = 0u64;
        let mut fallback_flips = 0u64;

        debug!(
            beta = self.beta,
            max_consequential_hits = self.max_consequential_hits,
            initial_energy,
            "starting thermalization"
        );

        let outcome = loop {
            if hits >= self.max_consequential_hits {
                break ThermalizationOutcome::Converged;
            }
            if self.iteration_cap.is_some_and(|cap| iterations >= cap) {
                break ThermalizationOutcome::IterationCapReached;
            }

            let flipped = sampler.step(lattice, self.beta, rng)?;
            iterations += 1;
            if flipped.fallback {
                fallback_flips += 1;
            }

            let next = energy(lattice);
            if next == current {
                hits += 1;
            } else {
                hits = 0;
            }
            current = next;

            trace!(iteration = iterations, energy = current, hits, "step");
            observer(&IterationRecord {
                iteration: iterations,
                energy: current,
                consequential_hits: hits,
                flipped,
            });
        };

        match outcome {
            ThermalizationOutcome::Converged => {
                self.state = DriverState::Converged;
                info!(iterations, final_energy = current, "thermal state reached");
            }
            ThermalizationOutcome::IterationCapReached => {
                warn!(iterations, final_energy = current, hits, "iteration cap reached before convergence");
            }
        }

        Ok(ThermalizationReport {
            outcome,
            iterations,
            initial_energy,
            final_energy: current,
            fallback_flips,
        })
    }
}

/// Evolve `lattice` in place until `max_consequential_hits` consecutive
/// iterations leave the energy unchanged.
///
/// The scratch buffer lives only for the duration of the call.
pub fn evolve_into_thermal_state(
    lattice: &mut Lattice,
    beta: f64,
    max_consequential_hits: usize,
    rng: &mut impl RandomSource,
) -> Result<ThermalizationReport> {
    ThermalizationDriver::new(beta, max_consequential_hits).run(lattice, rng)
}
