pub mod error;
pub mod spin;
pub mod lattice;
pub mod energy;
pub mod random;
pub mod sampler;
pub mod thermalize;
pub mod render;
pub mod config;

pub mod utils {
    pub mod rng;
}

pub use error::{Result, SimError};
pub use lattice::Lattice;
pub use spin::Spin;
pub use thermalize::{evolve_into_thermal_state, ThermalizationDriver, ThermalizationReport};
