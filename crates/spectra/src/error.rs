//! Error types for spectral tables and distributions using `thiserror`.

use thiserror::Error;

/// Errors raised while building spectral tables or distributions
#[derive(Error, Debug)]
pub enum SedError {
    /// Table value array does not match the axis grid
    #[error("Table shape mismatch: {expected} values expected for the axis grid, got {got}")]
    ShapeMismatch {
        /// Product of the axis lengths
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// An axis grid is not strictly increasing
    #[error("Axis '{axis}' must be strictly increasing")]
    NonMonotonicAxis {
        /// Axis name (lambda, logU, Z)
        axis: &'static str,
    },

    /// An axis grid is empty or too short to interpolate
    #[error("Axis '{axis}' needs at least {need} grid points, got {got}")]
    AxisTooShort {
        /// Axis name
        axis: &'static str,
        /// Minimum number of points
        need: usize,
        /// Number of points supplied
        got: usize,
    },

    /// A wavelength range with min >= max or non-positive bounds
    #[error("Invalid wavelength range: [{min_m} m, {max_m} m]")]
    InvalidRange {
        /// Lower bound in meters
        min_m: f64,
        /// Upper bound in meters
        max_m: f64,
    },

    /// A parameter vector of the wrong arity was passed to an SED family
    #[error("SED family expects {expected} parameters, got {got}")]
    ParameterCount {
        /// Declared parameter count
        expected: usize,
        /// Number of parameters supplied
        got: usize,
    },
}

/// Result type for spectral operations
pub type SedResult<T> = Result<T, SedError>;
