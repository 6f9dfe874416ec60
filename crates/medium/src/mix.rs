//! Material mixes: per-wavelength cross-sections and particle masses.

use units::{Length, Mass, HYDROGEN_MASS_KG};

/// Whether a mix represents dust grains or gas particles. The distinction
/// drives the mass-density policy of an imported medium: dust honors the
/// temperature cutoff, gas does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialType {
    Dust,
    Gas,
}

/// An opacity/scattering model for one material.
///
/// Cross-sections are per representative particle (per hydrogen atom for
/// the dust mix, per atom for gas) in m²; `mass` is the mass of that
/// representative particle, used to convert between number and mass
/// quantities.
pub trait MaterialMix: Send + Sync {
    fn material_type(&self) -> MaterialType;

    /// Mass per representative particle.
    fn mass(&self) -> Mass;

    /// Absorption cross-section (m²) at the given wavelength.
    fn section_abs(&self, wavelength: Length) -> f64;

    /// Scattering cross-section (m²) at the given wavelength.
    fn section_sca(&self, wavelength: Length) -> f64;

    /// Extinction cross-section (m²) at the given wavelength.
    fn section_ext(&self, wavelength: Length) -> f64 {
        self.section_abs(wavelength) + self.section_sca(wavelength)
    }

    fn is_dust(&self) -> bool {
        self.material_type() == MaterialType::Dust
    }

    fn is_gas(&self) -> bool {
        self.material_type() == MaterialType::Gas
    }
}

/// Mean interstellar dust: a power-law extinction curve anchored in the
/// V band, with a fixed albedo.
///
/// Cross-sections are per hydrogen atom. The V-band extinction
/// cross-section and the dust-to-hydrogen mass follow the usual diffuse
/// interstellar medium values; the power-law slope reproduces the overall
/// rise of the extinction curve toward the ultraviolet.
#[derive(Debug, Clone, Copy)]
pub struct MeanInterstellarDustMix {
    /// Extinction cross-section per H at 0.55 µm (m²)
    section_v: f64,
    /// Power-law exponent of the extinction curve
    slope: f64,
    /// Scattered fraction of the extinction
    albedo: f64,
}

impl MeanInterstellarDustMix {
    /// Dust mass per hydrogen atom (kg)
    const DUST_MASS_PER_H: f64 = 1.5e-29;
    /// Reference wavelength (m)
    const LAMBDA_V: f64 = 0.55e-6;

    pub fn new() -> Self {
        Self {
            section_v: 5.0e-26,
            slope: -1.3,
            albedo: 0.6,
        }
    }
}

impl Default for MeanInterstellarDustMix {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialMix for MeanInterstellarDustMix {
    fn material_type(&self) -> MaterialType {
        MaterialType::Dust
    }

    fn mass(&self) -> Mass {
        Mass::from_kg(Self::DUST_MASS_PER_H)
    }

    fn section_abs(&self, wavelength: Length) -> f64 {
        self.section_ext(wavelength) * (1.0 - self.albedo)
    }

    fn section_sca(&self, wavelength: Length) -> f64 {
        self.section_ext(wavelength) * self.albedo
    }

    fn section_ext(&self, wavelength: Length) -> f64 {
        let ratio = wavelength.to_m() / Self::LAMBDA_V;
        self.section_v * ratio.powf(self.slope)
    }
}

/// Neutral atomic hydrogen gas: photoionization absorption shortward of
/// the Lyman limit, no scattering.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralHydrogenGasMix;

impl NeutralHydrogenGasMix {
    /// Lyman limit (m)
    const LYMAN_LIMIT: f64 = 912e-10;
    /// Photoionization cross-section at the Lyman limit (m²)
    const SECTION_0: f64 = 6.3e-22;

    pub fn new() -> Self {
        Self
    }
}

impl MaterialMix for NeutralHydrogenGasMix {
    fn material_type(&self) -> MaterialType {
        MaterialType::Gas
    }

    fn mass(&self) -> Mass {
        Mass::from_kg(HYDROGEN_MASS_KG)
    }

    fn section_abs(&self, wavelength: Length) -> f64 {
        let lambda = wavelength.to_m();
        if lambda > Self::LYMAN_LIMIT {
            return 0.0;
        }
        // σ(λ) ≈ σ₀ (λ/λ_L)³ above threshold
        Self::SECTION_0 * (lambda / Self::LYMAN_LIMIT).powi(3)
    }

    fn section_sca(&self, _wavelength: Length) -> f64 {
        0.0
    }
}
