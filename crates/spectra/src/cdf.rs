//! Cumulative spectral distributions for wavelength sampling.
//!
//! A source's spectrum is reduced to a normalized cumulative distribution
//! over a wavelength grid once, then sampled per packet by inverse
//! transform. The construction is the expensive part (it integrates the
//! spectrum); sampling is a binary search plus a linear interpolation.

use rand::Rng;
use rand_chacha::ChaChaRng;
use units::{Length, Luminosity};

/// A normalized cumulative spectral distribution over a wavelength grid.
///
/// Stores the grid wavelengths (m), the normalized probability density at
/// each grid point (1/m), the cumulative distribution (0 at the first grid
/// point, 1 at the last), and the bolometric normalization in watts.
///
/// A spectrum that carries no luminosity over the grid yields an empty
/// distribution; `sample` then returns `None` and the caller is expected
/// to launch a zero-weight packet.
#[derive(Debug, Clone)]
pub struct SpectralCdf {
    lambdav: Vec<f64>,
    pv: Vec<f64>,
    cv: Vec<f64>,
    luminosity: Luminosity,
}

impl SpectralCdf {
    /// The empty distribution of a spectrum with zero luminosity.
    pub fn zero() -> Self {
        Self {
            lambdav: Vec::new(),
            pv: Vec::new(),
            cv: Vec::new(),
            luminosity: Luminosity::zero(),
        }
    }

    /// Build a distribution from specific luminosity samples.
    ///
    /// `lambdav` is a strictly increasing wavelength grid in meters and
    /// `lv` the specific luminosity (W/m) at each grid point. The bolometric
    /// normalization is the trapezoidal integral over the grid. Degenerate
    /// input (fewer than two points, or a non-positive integral) produces
    /// the zero distribution.
    pub fn from_samples(lambdav: Vec<f64>, lv: Vec<f64>) -> Self {
        assert_eq!(
            lambdav.len(),
            lv.len(),
            "wavelength grid and luminosity samples must have same length"
        );
        if lambdav.len() < 2 {
            return Self::zero();
        }

        // Trapezoidal integral of the specific luminosity
        let mut total = 0.0;
        for i in 0..lambdav.len() - 1 {
            let dl = lambdav[i + 1] - lambdav[i];
            total += 0.5 * (lv[i] + lv[i + 1]) * dl;
        }
        if !(total > 0.0) || !total.is_finite() {
            return Self::zero();
        }

        let pv: Vec<f64> = lv.iter().map(|l| l / total).collect();

        let mut cv = Vec::with_capacity(lambdav.len());
        cv.push(0.0);
        let mut running = 0.0;
        for i in 0..lambdav.len() - 1 {
            let dl = lambdav[i + 1] - lambdav[i];
            running += 0.5 * (pv[i] + pv[i + 1]) * dl;
            cv.push(running);
        }
        // Force the last entry to exactly one so inverse sampling never
        // falls off the end of the grid.
        let scale = 1.0 / running;
        for c in cv.iter_mut() {
            *c *= scale;
        }

        Self {
            lambdav,
            pv,
            cv,
            luminosity: Luminosity::from_watts(total),
        }
    }

    /// Bolometric normalization of the underlying spectrum.
    pub fn luminosity(&self) -> Luminosity {
        self.luminosity
    }

    /// Rescale the bolometric normalization without changing the shape.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.luminosity = self.luminosity * factor;
        self
    }

    /// True when the distribution carries no luminosity.
    pub fn is_zero(&self) -> bool {
        self.lambdav.is_empty()
    }

    /// Normalized probability density (1/m) at a grid wavelength, by
    /// linear interpolation; zero outside the grid.
    pub fn density(&self, wavelength: Length) -> f64 {
        let lambda = wavelength.to_m();
        if self.is_zero() || lambda < self.lambdav[0] || lambda > *self.lambdav.last().unwrap() {
            return 0.0;
        }
        let hi = self.lambdav.partition_point(|&x| x < lambda).max(1);
        let lo = hi - 1;
        let t = (lambda - self.lambdav[lo]) / (self.lambdav[hi] - self.lambdav[lo]);
        self.pv[lo] + t * (self.pv[hi] - self.pv[lo])
    }

    /// Draw a wavelength by inverse transform sampling.
    ///
    /// Returns `None` for the zero distribution.
    pub fn sample(&self, rng: &mut ChaChaRng) -> Option<Length> {
        if self.is_zero() {
            return None;
        }
        let u: f64 = rng.random();

        // First grid index with cumulative value above u
        let hi = self.cv.partition_point(|&c| c <= u).min(self.cv.len() - 1).max(1);
        let lo = hi - 1;

        let dc = self.cv[hi] - self.cv[lo];
        let t = if dc > 0.0 { (u - self.cv[lo]) / dc } else { 0.0 };
        let lambda = self.lambdav[lo] + t * (self.lambdav[hi] - self.lambdav[lo]);
        Some(Length::from_m(lambda))
    }
}
