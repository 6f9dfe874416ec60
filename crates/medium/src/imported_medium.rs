//! A transfer medium imported from a snapshot.
//!
//! The medium owns its snapshot and a material mix (or mix family) and
//! translates propagation-engine queries into snapshot lookups, converting
//! between number and mass quantities through the mix's particle mass.

use log::info;
use nalgebra::{Point3, Vector3};
use rand_chacha::ChaChaRng;
use snapshot::{MassDensityPolicy, Snapshot};
use thiserror::Error;
use units::{Length, Mass, Temperature};

use crate::mix::MaterialMix;
use crate::mix_family::MaterialMixFamily;

/// Errors raised while configuring an imported medium
#[derive(Error, Debug)]
pub enum MediumError {
    /// Variable mix parameters enabled without a mix family
    #[error("importVariableMixParams requires a material mix family, not a fixed mix")]
    MissingMixFamily,

    /// Mass fraction outside (0, 1]
    #[error("massFraction must lie in (0, 1], got {value}")]
    MassFractionRange {
        /// The configured value
        value: f64,
    },

    /// Snapshot import failure
    #[error(transparent)]
    Import(#[from] snapshot::ImportError),
}

/// Configuration of an imported medium.
#[derive(Debug, Clone)]
pub struct ImportedMediumConfig {
    /// Fraction of the imported mass assigned to this medium
    pub mass_fraction: f64,
    /// Cells hotter than this contribute no mass (dust only)
    pub max_temperature: Temperature,
    pub import_metallicity: bool,
    pub import_temperature: bool,
    pub import_velocity: bool,
    pub import_magnetic_field: bool,
    pub import_variable_mix_params: bool,
}

impl Default for ImportedMediumConfig {
    fn default() -> Self {
        Self {
            mass_fraction: 1.0,
            max_temperature: Temperature::zero(),
            import_metallicity: false,
            import_temperature: false,
            import_velocity: false,
            import_magnetic_field: false,
            import_variable_mix_params: false,
        }
    }
}

/// A fixed mix or a parameter-keyed family.
pub enum MixOption {
    Fixed(Box<dyn MaterialMix>),
    Family(Box<dyn MaterialMixFamily>),
}

/// A medium whose spatial structure comes from an imported snapshot.
pub struct ImportedMedium {
    config: ImportedMediumConfig,
    mix: MixOption,
    snapshot: Option<Snapshot>,
}

impl ImportedMedium {
    /// Create the medium; `setup` must be called with an opened snapshot
    /// before any spatial query.
    pub fn new(config: ImportedMediumConfig, mix: MixOption) -> Result<Self, MediumError> {
        if !(config.mass_fraction > 0.0 && config.mass_fraction <= 1.0) {
            return Err(MediumError::MassFractionRange {
                value: config.mass_fraction,
            });
        }
        if config.import_variable_mix_params && matches!(mix, MixOption::Fixed(_)) {
            return Err(MediumError::MissingMixFamily);
        }
        Ok(Self {
            config,
            mix,
            snapshot: None,
        })
    }

    /// Configure the snapshot's optional columns and density policy, then
    /// read it. Called serially during setup.
    pub fn setup(&mut self, mut snapshot: Snapshot) -> Result<(), MediumError> {
        if self.config.import_metallicity {
            snapshot.import_metallicity();
        }
        if self.config.import_temperature {
            snapshot.import_temperature();
        }
        if self.config.import_velocity {
            snapshot.import_velocity();
        }
        if self.config.import_magnetic_field {
            snapshot.import_magnetic_field();
        }
        if self.config.import_variable_mix_params {
            if let MixOption::Family(family) = &self.mix {
                snapshot.import_parameters(family.parameter_info());
            }
        }

        // Dust honors the temperature cutoff; gas never does. Metallicity
        // multiplies in both cases.
        let max_temperature = if self.default_mix().is_dust() && self.config.import_temperature {
            self.config.max_temperature.to_kelvin()
        } else {
            0.0
        };
        snapshot.set_mass_density_policy(MassDensityPolicy {
            mass_fraction: self.config.mass_fraction,
            max_temperature,
            use_metallicity: true,
        });

        snapshot.read_and_close()?;
        self.snapshot = Some(snapshot);
        info!(
            "Medium holds {:.6e} kg across {} sites",
            self.mass().to_kg(),
            self.num_sites()
        );
        Ok(())
    }

    fn snapshot(&self) -> &Snapshot {
        self.snapshot
            .as_ref()
            .expect("imported medium queried before setup")
    }

    /// The medium is an arbitrary 3D structure.
    pub fn dimension(&self) -> u32 {
        3
    }

    /// True when the mix varies from cell to cell.
    pub fn has_variable_mix(&self) -> bool {
        self.config.import_variable_mix_params
    }

    /// True when packets launched in this medium carry a bulk velocity.
    pub fn has_velocity(&self) -> bool {
        self.config.import_velocity
    }

    /// True when the medium carries a magnetic field.
    pub fn has_magnetic_field(&self) -> bool {
        self.config.import_magnetic_field
    }

    /// The mix used when no position is specified: the fixed mix, or the
    /// family's default selection.
    ///
    /// Also serves configuration-time queries that arrive before `setup`
    /// has built the snapshot; those see the family's default mix derived
    /// from a zeroed parameter vector of the declared arity.
    pub fn default_mix(&self) -> &dyn MaterialMix {
        match &self.mix {
            MixOption::Fixed(mix) => mix.as_ref(),
            MixOption::Family(family) => {
                let zeros = vec![0.0; family.parameter_info().len()];
                family.mix(&zeros)
            }
        }
    }

    /// The mix at a position. For a fixed mix this never touches the
    /// snapshot; for a family the cell's imported parameters select the
    /// mix, falling back to the default before setup.
    pub fn mix_at(&self, position: &Point3<f64>) -> &dyn MaterialMix {
        match &self.mix {
            MixOption::Fixed(mix) => mix.as_ref(),
            MixOption::Family(family) => match &self.snapshot {
                Some(snapshot) => {
                    let parameters = snapshot.parameters(position);
                    family.mix(&parameters)
                }
                None => self.default_mix(),
            },
        }
    }

    /// Number density (1/m³) at a position.
    pub fn number_density(&self, position: &Point3<f64>) -> f64 {
        let mut result = self.snapshot().density(position);
        if !self.snapshot().holds_number() {
            result /= self.mix_at(position).mass().to_kg();
        }
        result
    }

    /// Total number of material particles in the medium.
    pub fn number(&self) -> f64 {
        let mut result = self.snapshot().mass();
        if !self.snapshot().holds_number() {
            result /= self.default_mix().mass().to_kg();
        }
        result
    }

    /// Mass density (kg/m³) at a position.
    pub fn mass_density(&self, position: &Point3<f64>) -> f64 {
        let mut result = self.snapshot().density(position);
        if self.snapshot().holds_number() {
            result *= self.mix_at(position).mass().to_kg();
        }
        result
    }

    /// Total mass of the medium.
    pub fn mass(&self) -> Mass {
        let mut result = self.snapshot().mass();
        if self.snapshot().holds_number() {
            result *= self.default_mix().mass().to_kg();
        }
        Mass::from_kg(result)
    }

    /// Bulk velocity (m/s) at a position; zero when velocity was not
    /// imported.
    pub fn bulk_velocity(&self, position: &Point3<f64>) -> Vector3<f64> {
        if self.has_velocity() {
            self.snapshot().velocity(position)
        } else {
            Vector3::zeros()
        }
    }

    /// Magnetic field (T) at a position; zero when not imported.
    pub fn magnetic_field(&self, position: &Point3<f64>) -> Vector3<f64> {
        if self.has_magnetic_field() {
            self.snapshot().magnetic_field(position)
        } else {
            Vector3::zeros()
        }
    }

    /// Temperature at a position: the imported value for gas, zero for
    /// dust.
    pub fn temperature(&self, position: &Point3<f64>) -> Temperature {
        if self.default_mix().is_gas() && self.config.import_temperature {
            Temperature::from_kelvin(self.snapshot().temperature(position))
        } else {
            Temperature::zero()
        }
    }

    /// Optical depth along the x axis through the domain center.
    pub fn optical_depth_x(&self, wavelength: Length) -> f64 {
        self.optical_depth(self.snapshot().sigma_x(), wavelength)
    }

    /// Optical depth along the y axis through the domain center.
    pub fn optical_depth_y(&self, wavelength: Length) -> f64 {
        self.optical_depth(self.snapshot().sigma_y(), wavelength)
    }

    /// Optical depth along the z axis through the domain center.
    pub fn optical_depth_z(&self, wavelength: Length) -> f64 {
        self.optical_depth(self.snapshot().sigma_z(), wavelength)
    }

    fn optical_depth(&self, sigma: f64, wavelength: Length) -> f64 {
        let mut result = sigma * self.default_mix().section_ext(wavelength);
        if !self.snapshot().holds_number() {
            result /= self.default_mix().mass().to_kg();
        }
        result
    }

    /// Draw a position distributed proportionally to mass. None when the
    /// medium carries no mass or interior sampling fails.
    pub fn generate_position(&self, rng: &mut ChaChaRng) -> Option<Point3<f64>> {
        self.snapshot().generate_position(rng)
    }

    /// Number of imported sites (particles or cells).
    pub fn num_sites(&self) -> usize {
        self.snapshot().num_entities()
    }

    /// Position of the site with the given index.
    pub fn site_position(&self, index: usize) -> Point3<f64> {
        self.snapshot().position(index)
    }
}
