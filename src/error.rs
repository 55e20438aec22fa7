//! Crate-wide error type.

use thiserror::Error;

/// Everything that can go wrong while building, evolving or parsing a lattice.
#[derive(Debug, Error)]
pub enum SimError {
    /// A lattice needs at least one row and one column, and a cell count
    /// that fits in `usize`.
    #[error("Invalid lattice dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Backing storage for `cells` entries could not be reserved.
    #[error("Cannot allocate storage for {cells} cells")]
    Allocation { cells: usize },

    /// The candidate weights do not normalize into a probability distribution.
    ///
    /// Happens when `exp(-beta * energy)` underflows to zero (or overflows to
    /// infinity) for every candidate, e.g. at extreme `beta`.
    #[error("Flip weights sum to {sum}, cannot normalize")]
    DegenerateDistribution { sum: f64 },

    /// The sampler's buffer was sized for a different lattice.
    #[error("Flip buffer holds {actual} sites but the lattice has {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Unknown symbol in a rendered lattice.
    #[error("Unexpected symbol {symbol:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        symbol: char,
    },

    /// Rows of a rendered lattice differ in length.
    #[error("Line {line} has {actual} cells, expected {expected}")]
    RaggedRows {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// Rendered lattice contains no rows.
    #[error("No lattice rows found in input")]
    EmptyInput,

    /// A configuration field has an invalid value.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

impl SimError {
    /// Shorthand for [`SimError::InvalidValue`].
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
