use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub const PC_TO_M: f64 = 3.0857e16;
pub const AU_TO_M: f64 = 1.496e11;
pub const KM_TO_M: f64 = 1e3;
pub const MICRON_TO_M: f64 = 1e-6;
pub const ANGSTROM_TO_M: f64 = 1e-10;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with meters as the base unit.
/// SI is the natural choice for radiative transfer because wavelengths,
/// cross-sections and densities combine without conversion factors; the
/// astronomy units (parsec, AU) appear only at the import boundary.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// // Create lengths using different units
/// let domain_size = Length::from_parsec(2.0);
/// let wavelength = Length::from_micron(0.55);
/// let uv_edge = Length::from_angstrom(912.0);
///
/// // Convert between units
/// let wavelength_m = wavelength.to_m();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: meter

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_m(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in kilometers.
    pub fn from_km(value: f64) -> Self {
        Self(value * KM_TO_M)
    }

    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value * AU_TO_M)
    }

    /// Creates a new `Length` from a value in parsec.
    pub fn from_parsec(value: f64) -> Self {
        Self(value * PC_TO_M)
    }

    /// Creates a new `Length` from a value in microns.
    pub fn from_micron(value: f64) -> Self {
        Self(value * MICRON_TO_M)
    }

    /// Creates a new `Length` from a value in Ångström.
    pub fn from_angstrom(value: f64) -> Self {
        Self(value * ANGSTROM_TO_M)
    }

    /// Returns the length in meters.
    pub fn to_m(&self) -> f64 {
        self.0
    }

    /// Converts the length to kilometers.
    pub fn to_km(&self) -> f64 {
        self.0 / KM_TO_M
    }

    /// Converts the length to astronomical units.
    pub fn to_au(&self) -> f64 {
        self.0 / AU_TO_M
    }

    /// Converts the length to parsec.
    pub fn to_parsec(&self) -> f64 {
        self.0 / PC_TO_M
    }

    /// Converts the length to microns.
    pub fn to_micron(&self) -> f64 {
        self.0 / MICRON_TO_M
    }

    /// Converts the length to Ångström.
    pub fn to_angstrom(&self) -> f64 {
        self.0 / ANGSTROM_TO_M
    }

    /// Returns the minimum of two lengths.
    pub fn min(self, other: Self) -> Self {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two lengths.
    pub fn max(self, other: Self) -> Self {
        if self.0 > other.0 {
            self
        } else {
            other
        }
    }

    /// Natural logarithm of the value in meters
    pub fn ln(&self) -> f64 {
        self.0.ln()
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
