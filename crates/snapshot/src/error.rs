//! Import error types using `thiserror`.
//!
//! Input-file problems are fatal during setup; the diagnostics identify the
//! offending file, line and column so a misconfigured import is traceable
//! without rerunning under a debugger.

use thiserror::Error;

/// Errors raised while importing a snapshot from column text
#[derive(Error, Debug)]
pub enum ImportError {
    /// Underlying I/O failure while reading the file
    #[error("Cannot read snapshot file '{file}': {source}")]
    Io {
        /// Path of the file being read
        file: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A field could not be parsed as a number
    #[error("Cannot parse '{token}' as a number in file '{file}', line {line}, column {column}")]
    ParseNumber {
        /// Path of the file being read
        file: String,
        /// 1-based line number
        line: usize,
        /// 1-based column index
        column: usize,
        /// The offending token
        token: String,
    },

    /// A data row has fewer columns than the import configuration needs
    #[error("Missing columns in file '{file}', line {line}: expected {expected}, got {got}")]
    MissingColumns {
        /// Path of the file being read
        file: String,
        /// 1-based line number
        line: usize,
        /// Number of columns required by the enabled imports
        expected: usize,
        /// Number of columns present
        got: usize,
    },

    /// A unit header declares a unit the importer does not know for that
    /// column's quantity
    #[error("Unknown unit '{unit}' for column '{column}' in file '{file}'")]
    UnknownUnit {
        /// Path of the file being read
        file: String,
        /// Column name from the import configuration
        column: String,
        /// The declared unit
        unit: String,
    },

    /// The file contains no data rows
    #[error("Snapshot file '{file}' contains no entities")]
    NoEntities {
        /// Path of the file being read
        file: String,
    },

    /// The configured spatial domain is degenerate
    #[error("Snapshot domain is degenerate: extent {extent_m} m along axis {axis}")]
    DegenerateDomain {
        /// Axis index (0 = x, 1 = y, 2 = z)
        axis: usize,
        /// Domain extent along that axis in meters
        extent_m: f64,
    },
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
