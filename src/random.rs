//! Uniform random numbers for the sampler.
//!
//! Components that need randomness take a `&mut impl RandomSource` instead of
//! reaching for a process-wide generator. Any `rand` generator works as-is;
//! [`ScriptedSource`] replays fixed draws.

use rand::{Rng, RngCore};

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedSource {
    /// Every draw is clamped into `[0, 1)`, the top being the largest `f64`
    /// below one. An empty script always yields 0.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|r| r.clamp(0.0, 1.0 - f64::EPSILON / 2.0))
            .collect();
        Self { draws, pos: 0 }
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let r = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        r
    }
}
