use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// One solar luminosity in watts
pub const SOLAR_LUMINOSITY_W: f64 = 3.828e26;

/// A bolometric luminosity quantity using f64 precision.
///
/// Base unit is the watt. Source luminosities, packet weights and SED
/// normalizations all flow through this type; specific luminosity
/// (W/m) stays a raw `f64` because it only ever lives inside spectral
/// tables and cumulative distributions.
///
/// # Examples
///
/// ```rust
/// use units::Luminosity;
///
/// let star = Luminosity::from_solar_luminosities(1.0);
/// assert!(star.to_watts() > 3.8e26);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Luminosity(f64); // Base unit: watt

impl Luminosity {
    /// Creates a zero luminosity value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Luminosity` from a value in watts.
    pub fn from_watts(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Luminosity` from a value in solar luminosities.
    pub fn from_solar_luminosities(value: f64) -> Self {
        Self(value * SOLAR_LUMINOSITY_W)
    }

    /// Returns the luminosity in watts.
    pub fn to_watts(&self) -> f64 {
        self.0
    }

    /// Converts the luminosity to solar luminosities.
    pub fn to_solar_luminosities(&self) -> f64 {
        self.0 / SOLAR_LUMINOSITY_W
    }

    /// True when the luminosity is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl Add for Luminosity {
    type Output = Luminosity;

    fn add(self, rhs: Luminosity) -> Luminosity {
        Luminosity(self.0 + rhs.0)
    }
}

impl Sub for Luminosity {
    type Output = Luminosity;

    fn sub(self, rhs: Luminosity) -> Luminosity {
        Luminosity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Luminosity {
    type Output = Luminosity;

    fn mul(self, rhs: f64) -> Luminosity {
        Luminosity(self.0 * rhs)
    }
}

impl Div<f64> for Luminosity {
    type Output = Luminosity;

    fn div(self, rhs: f64) -> Luminosity {
        Luminosity(self.0 / rhs)
    }
}

/// Division of Luminosity by Luminosity returns a dimensionless ratio
impl Div for Luminosity {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<Luminosity> for f64 {
    type Output = Luminosity;

    fn mul(self, rhs: Luminosity) -> Luminosity {
        rhs * self
    }
}
