//! Parameterized SED families for imported sources.
//!
//! An SED family maps a per-entity parameter vector to a spectrum. The gas
//! emission families below share one table schema (λ, logU, Z → L_λ) but
//! are distinct types loading separate tables: one for continuum emission,
//! one for line emission re-binned onto the same axes.

use units::Length;

use crate::cdf::SpectralCdf;
use crate::error::{SedError, SedResult};
use crate::range::WavelengthRange;
use crate::table::SedTable;

/// Description of one parameter column an SED family expects from a
/// snapshot, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotParameter {
    /// Column name as it appears in import diagnostics
    pub name: &'static str,
    /// Physical quantity, when the column is not dimensionless
    pub quantity: Option<&'static str>,
    /// Unit of the stored value
    pub unit: Option<&'static str>,
}

impl SnapshotParameter {
    /// A dimensionless parameter column.
    pub const fn dimensionless(name: &'static str) -> Self {
        Self {
            name,
            quantity: None,
            unit: None,
        }
    }
}

/// A parameterized family of spectral energy distributions.
pub trait SedFamily: Send + Sync {
    /// The parameter columns this family consumes, in order.
    fn parameter_info(&self) -> Vec<SnapshotParameter>;

    /// The wavelength interval over which the family is defined.
    fn intrinsic_wavelength_range(&self) -> WavelengthRange;

    /// Specific luminosity (W/m) at the given wavelength for the given
    /// parameter vector.
    fn specific_luminosity(&self, wavelength: Length, parameters: &[f64]) -> f64;

    /// Cumulative spectral distribution over the requested range for the
    /// given parameter vector. The distribution's bolometric normalization
    /// carries the entity's luminosity over that range.
    fn cdf(&self, range: &WavelengthRange, parameters: &[f64]) -> SpectralCdf;

    /// Check a parameter vector against the declared arity.
    fn check_parameters(&self, parameters: &[f64]) -> SedResult<()> {
        let expected = self.parameter_info().len();
        if parameters.len() != expected {
            return Err(SedError::ParameterCount {
                expected,
                got: parameters.len(),
            });
        }
        Ok(())
    }
}

/// Shared parameter layout of the gas emission families:
/// [logU, metallicity, ionising luminosity (W), emission flag].
fn gas_parameter_info() -> Vec<SnapshotParameter> {
    vec![
        SnapshotParameter::dimensionless("logU"),
        SnapshotParameter::dimensionless("metallicity"),
        SnapshotParameter {
            name: "IonisingLum",
            quantity: Some("Luminosity"),
            unit: Some("W"),
        },
        SnapshotParameter::dimensionless("EmissionBool"),
    ]
}

/// Scale factor applied to the table spectrum: the ionising luminosity
/// times the emission flag. A flag of zero silences the entity entirely.
fn gas_scale(parameters: &[f64]) -> f64 {
    parameters[2] * parameters[3]
}

/// Continuum emission from ionized gas, tabulated on (λ, logU, Z).
#[derive(Debug, Clone)]
pub struct GasContinuumEmissionSedFamily {
    table: SedTable,
}

impl GasContinuumEmissionSedFamily {
    pub fn new(table: SedTable) -> Self {
        Self { table }
    }
}

impl SedFamily for GasContinuumEmissionSedFamily {
    fn parameter_info(&self) -> Vec<SnapshotParameter> {
        gas_parameter_info()
    }

    fn intrinsic_wavelength_range(&self) -> WavelengthRange {
        self.table.axis_range()
    }

    fn specific_luminosity(&self, wavelength: Length, parameters: &[f64]) -> f64 {
        assert_eq!(parameters.len(), 4, "gas SED family takes 4 parameters");
        gas_scale(parameters) * self.table.value(wavelength, parameters[0], parameters[1])
    }

    fn cdf(&self, range: &WavelengthRange, parameters: &[f64]) -> SpectralCdf {
        assert_eq!(parameters.len(), 4, "gas SED family takes 4 parameters");
        let scale = gas_scale(parameters);
        if scale <= 0.0 {
            return SpectralCdf::zero();
        }
        self.table
            .cdf(range, parameters[0], parameters[1])
            .scaled(scale)
    }
}

/// Line emission from ionized gas, re-binned onto the same axes as the
/// continuum family but loaded from its own table.
#[derive(Debug, Clone)]
pub struct GasLineEmissionSedFamily {
    table: SedTable,
}

impl GasLineEmissionSedFamily {
    pub fn new(table: SedTable) -> Self {
        Self { table }
    }
}

impl SedFamily for GasLineEmissionSedFamily {
    fn parameter_info(&self) -> Vec<SnapshotParameter> {
        gas_parameter_info()
    }

    fn intrinsic_wavelength_range(&self) -> WavelengthRange {
        self.table.axis_range()
    }

    fn specific_luminosity(&self, wavelength: Length, parameters: &[f64]) -> f64 {
        assert_eq!(parameters.len(), 4, "gas SED family takes 4 parameters");
        gas_scale(parameters) * self.table.value(wavelength, parameters[0], parameters[1])
    }

    fn cdf(&self, range: &WavelengthRange, parameters: &[f64]) -> SpectralCdf {
        assert_eq!(parameters.len(), 4, "gas SED family takes 4 parameters");
        let scale = gas_scale(parameters);
        if scale <= 0.0 {
            return SpectralCdf::zero();
        }
        self.table
            .cdf(range, parameters[0], parameters[1])
            .scaled(scale)
    }
}
