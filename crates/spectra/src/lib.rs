//! Spectral energy distributions, tabulated SED families and wavelength
//! sampling for the photon-packet launch core.

pub mod blackbody;
pub mod cdf;
pub mod error;
pub mod family;
pub mod range;
pub mod table;

#[cfg(test)]
mod blackbody_test;
#[cfg(test)]
mod table_test;

pub use blackbody::BlackbodySed;
pub use cdf::SpectralCdf;
pub use error::{SedError, SedResult};
pub use family::{
    GasContinuumEmissionSedFamily, GasLineEmissionSedFamily, SedFamily, SnapshotParameter,
};
pub use range::WavelengthRange;
pub use table::SedTable;
