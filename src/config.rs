//! Run parameters (single source of truth for both binaries).

use crate::error::{Result, SimError};
use crate::sampler::EnergyEvaluation;
use crate::spin::Spin;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub ground_state: Spin,
    /// Inverse temperature.
    pub beta: f64,
    /// Consecutive unchanged-energy iterations that count as converged.
    pub max_consequential_hits: usize,
    /// Generator seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub max_iterations: Option<u64>,
    pub evaluation: EnergyEvaluation,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            ground_state: Spin::Down,
            beta: 1.0,
            max_consequential_hits: 3,
            seed: None,
            max_iterations: None,
            evaluation: EnergyEvaluation::FullRecompute,
        }
    }
}

impl SimulationConfig {
    /// Reject configurations the core would accept but that make no
    /// physical sense (negative or non-finite temperature).
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(SimError::invalid_value("width", "must be > 0"));
        }
        if self.height == 0 {
            return Err(SimError::invalid_value("height", "must be > 0"));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(SimError::invalid_value("width", "width * height overflows"));
        }
        if !self.beta.is_finite() {
            return Err(SimError::invalid_value("beta", format!("must be finite, got {}", self.beta)));
        }
        if self.beta < 0.0 {
            return Err(SimError::invalid_value("beta", format!("must be >= 0, got {}", self.beta)));
        }
        if self.max_iterations == Some(0) {
            return Err(SimError::invalid_value("max_iterations", "must be > 0 when set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_run() {
        let cfg = SimulationConfig::default();
        assert_eq!((cfg.width, cfg.height), (5, 5));
        assert_eq!(cfg.ground_state, Spin::Down);
        assert_eq!(cfg.beta, 1.0);
        assert_eq!(cfg.max_consequential_hits, 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            SimulationConfig { width: 0, ..Default::default() },
            SimulationConfig { height: 0, ..Default::default() },
            SimulationConfig { beta: -0.5, ..Default::default() },
            SimulationConfig { beta: f64::NAN, ..Default::default() },
            SimulationConfig { max_iterations: Some(0), ..Default::default() },
        ];
        for cfg in bad {
            assert!(matches!(cfg.validate(), Err(SimError::InvalidValue { .. })), "{cfg:?}");
        }
    }
}
