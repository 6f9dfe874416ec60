//! Blackbody spectrum for geometric sources.

use units::{Length, Luminosity, Temperature, SPEED_OF_LIGHT};

use crate::cdf::SpectralCdf;
use crate::range::WavelengthRange;

/// Planck constant in J·s
const PLANCK: f64 = 6.62607015e-34;
/// Boltzmann constant in J/K
const BOLTZMANN: f64 = 1.380649e-23;

/// Number of log-spaced grid points used to tabulate the Planck curve
const GRID_POINTS: usize = 512;

/// A blackbody spectrum at a fixed temperature.
///
/// Geometric sources use this to sample packet wavelengths: the Planck
/// curve is tabulated once over the configured range and normalized to the
/// source's bolometric luminosity over that range.
#[derive(Debug, Clone, Copy)]
pub struct BlackbodySed {
    temperature: Temperature,
}

impl BlackbodySed {
    pub fn new(temperature: Temperature) -> Self {
        Self { temperature }
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Planck spectral radiance shape at the given wavelength, in
    /// arbitrary units. Only the shape matters; normalization happens in
    /// `cdf`.
    fn planck_shape(&self, lambda: f64) -> f64 {
        let t = self.temperature.to_kelvin();
        if t <= 0.0 || lambda <= 0.0 {
            return 0.0;
        }
        let x = PLANCK * SPEED_OF_LIGHT / (lambda * BOLTZMANN * t);
        // exp(x) overflows for deep Wien-tail wavelengths; the shape is
        // zero there to double precision anyway.
        if x > 700.0 {
            return 0.0;
        }
        lambda.powi(-5) / (x.exp() - 1.0)
    }

    /// Cumulative spectral distribution over the requested range,
    /// normalized so its bolometric luminosity equals `luminosity`.
    pub fn cdf(&self, range: &WavelengthRange, luminosity: Luminosity) -> SpectralCdf {
        let lo = range.min().to_m().ln();
        let hi = range.max().to_m().ln();

        let grid: Vec<f64> = (0..GRID_POINTS)
            .map(|i| {
                let frac = i as f64 / (GRID_POINTS - 1) as f64;
                (lo + frac * (hi - lo)).exp()
            })
            .collect();
        let shape: Vec<f64> = grid.iter().map(|&l| self.planck_shape(l)).collect();

        let cdf = SpectralCdf::from_samples(grid, shape);
        if cdf.is_zero() {
            return cdf;
        }
        // Replace the arbitrary shape normalization with the requested one
        let factor = luminosity / cdf.luminosity();
        cdf.scaled(factor)
    }

    /// Specific luminosity (W/m) at the given wavelength for a source with
    /// the given bolometric luminosity over the given range.
    pub fn specific_luminosity(
        &self,
        wavelength: Length,
        range: &WavelengthRange,
        luminosity: Luminosity,
    ) -> f64 {
        if !range.contains(wavelength) {
            return 0.0;
        }
        let cdf = self.cdf(range, luminosity);
        cdf.density(wavelength) * cdf.luminosity().to_watts()
    }
}
