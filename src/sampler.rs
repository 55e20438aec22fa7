//! Full-enumeration single-spin-flip sampler.
//!
//! Each step weighs every site by the Boltzmann weight the whole lattice
//! would have with that one spin flipped, normalizes the weights into a
//! distribution over sites, draws one site and flips it.

use crate::energy::{boltzmann, energy, flip_delta, weight};
use crate::error::{Result, SimError};
use crate::lattice::Lattice;
use crate::random::RandomSource;
use tracing::warn;

/// How candidate energies are obtained.
///
/// Both produce the same integer energy per candidate, hence bit-identical
/// weights and identical draws for the same random stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyEvaluation {
    /// Flip, recompute the whole-lattice energy, flip back. O(N) per site.
    #[default]
    FullRecompute,
    /// Current energy plus the local flip delta. O(1) per site.
    LocalDelta,
}

/// Returned by [`SpinFlipSampler::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipOutcome {
    pub x: isize,
    pub y: isize,
    /// The cumulative walk never passed the draw (rounding at the tail), so
    /// the last site in traversal order was flipped instead.
    pub fallback: bool,
}

/// Owns the per-site probability buffer, reused across steps.
#[derive(Debug, Clone)]
pub struct SpinFlipSampler {
    probabilities: Vec<f64>,
    evaluation: EnergyEvaluation,
}

impl SpinFlipSampler {
    /// Sampler sized for `lattice`.
    pub fn for_lattice(lattice: &Lattice) -> Result<Self> {
        Self::with_evaluation(lattice, EnergyEvaluation::default())
    }

    pub fn with_evaluation(lattice: &Lattice, evaluation: EnergyEvaluation) -> Result<Self> {
        let n = lattice.len();
        let mut probabilities = Vec::new();
        probabilities
            .try_reserve_exact(n)
            .map_err(|_| SimError::Allocation { cells: n })?;
        probabilities.resize(n, 0.0);
        Ok(Self { probabilities, evaluation })
    }

    pub fn evaluation(&self) -> EnergyEvaluation {
        self.evaluation
    }

    /// Normalized flip probabilities from the last step, in storage order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Fill the buffer with normalized flip probabilities for the current
    /// state without touching the lattice (beyond flips that are undone).
    pub fn compute_probabilities(&mut self, lattice: &mut Lattice, beta: f64) -> Result<&[f64]> {
        if lattice.len() != self.probabilities.len() {
            return Err(SimError::BufferSizeMismatch {
                expected: lattice.len(),
                actual: self.probabilities.len(),
            });
        }

        match self.evaluation {
            EnergyEvaluation::FullRecompute => {
                let (w, h) = (lattice.width() as isize, lattice.height() as isize);
                for x in 0..w {
                    for y in 0..h {
                        lattice.flip(x, y);
                        let wgt = weight(lattice, beta);
                        self.probabilities[lattice.index(x, y)] = wgt;
                        lattice.flip(x, y);
                    }
                }
            }
            EnergyEvaluation::LocalDelta => {
                let e = energy(lattice);
                for (x, y) in lattice.sites() {
                    let w = boltzmann(e + flip_delta(lattice, x, y), beta);
                    self.probabilities[lattice.index(x, y)] = w;
                }
            }
        }

        let sum: f64 = self.probabilities.iter().sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(SimError::DegenerateDistribution { sum });
        }
        for p in &mut self.probabilities {
            *p /= sum;
        }
        Ok(&self.probabilities)
    }

    /// Draw one site and flip it.
    ///
    /// Consumes exactly one value from `rng`. On error the lattice is left as
    /// it was.
    pub fn step(
        &mut self,
        lattice: &mut Lattice,
        beta: f64,
        rng: &mut impl RandomSource,
    ) -> Result<FlipOutcome> {
        self.compute_probabilities(lattice, beta)?;

        let r = rng.next_uniform();
        let mut cumulative = 0.0;
        let mut site = None;
        for (i, &p) in self.probabilities.iter().enumerate() {
            cumulative += p;
            if cumulative > r {
                site = Some(i);
                break;
            }
        }

        // Buffer offsets follow traversal order, so offset i is
        // (i / height, i % height).
        if let Some(i) = site {
            let h = lattice.height();
            let (x, y) = ((i / h) as isize, (i % h) as isize);
            lattice.flip(x, y);
            return Ok(FlipOutcome { x, y, fallback: false });
        }

        let (x, y) = (lattice.width() as isize - 1, lattice.height() as isize - 1);
        warn!(r, cumulative, x, y, "flip walk ended below draw, flipping last site");
        lattice.flip(x, y);
        Ok(FlipOutcome { x, y, fallback: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use crate::spin::Spin;

    #[test]
    fn test_uniform_ground_state_gives_uniform_distribution() {
        let mut lat = Lattice::new(3, 3, Spin::Down).unwrap();
        let mut sampler = SpinFlipSampler::for_lattice(&lat).unwrap();
        let probs = sampler.compute_probabilities(&mut lat, 1.0).unwrap();
        for &p in probs {
            assert!((p - 1.0 / 9.0).abs() < 1e-12);
        }
        assert_eq!(lat, Lattice::new(3, 3, Spin::Down).unwrap());
    }

    #[test]
    fn test_draw_selects_by_cumulative_sum() {
        // Nine equal probabilities: r = 0.5 lands in the fifth site, (1, 1).
        let mut lat = Lattice::new(3, 3, Spin::Up).unwrap();
        let mut sampler = SpinFlipSampler::for_lattice(&lat).unwrap();
        let mut src = ScriptedSource::new([0.5]);
        let out = sampler.step(&mut lat, 0.3, &mut src).unwrap();
        assert_eq!(out, FlipOutcome { x: 1, y: 1, fallback: false });
        assert_eq!(lat.spin(1, 1), Some(Spin::Down));
        assert_eq!(lat.magnetization(), 7);
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let small = Lattice::new(2, 2, Spin::Up).unwrap();
        let mut big = Lattice::new(3, 3, Spin::Up).unwrap();
        let mut sampler = SpinFlipSampler::for_lattice(&small).unwrap();
        let err = sampler.step(&mut big, 1.0, &mut ScriptedSource::new([0.1]));
        assert!(matches!(
            err,
            Err(SimError::BufferSizeMismatch { expected: 9, actual: 4 })
        ));
    }

    #[test]
    fn test_underflow_is_reported() {
        // exp(-1000 * 784) underflows to zero for every candidate.
        let mut lat = Lattice::new(14, 14, Spin::Up).unwrap();
        let before = lat.clone();
        let mut sampler = SpinFlipSampler::for_lattice(&lat).unwrap();
        let err = sampler.step(&mut lat, 1000.0, &mut ScriptedSource::new([0.1]));
        assert!(matches!(err, Err(SimError::DegenerateDistribution { .. })));
        assert_eq!(lat, before);
    }
}
