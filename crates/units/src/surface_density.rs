use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// A mass surface density (column density) quantity using f64 precision.
///
/// Base unit is kg/m². Column densities along the principal axes of an
/// imported medium are surface densities; multiplying by an extinction
/// cross-section per unit mass yields an optical depth.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SurfaceDensity(f64); // Base unit: kg/m²

impl SurfaceDensity {
    /// Creates a zero surface density value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `SurfaceDensity` from a value in kg/m².
    pub fn from_kg_per_m2(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `SurfaceDensity` from a value in g/cm².
    pub fn from_g_per_cm2(value: f64) -> Self {
        Self(value * 10.0)
    }

    /// Returns the surface density in kg/m².
    pub fn to_kg_per_m2(&self) -> f64 {
        self.0
    }

    /// Converts the surface density to g/cm².
    pub fn to_g_per_cm2(&self) -> f64 {
        self.0 / 10.0
    }
}

impl Add for SurfaceDensity {
    type Output = SurfaceDensity;

    fn add(self, rhs: SurfaceDensity) -> SurfaceDensity {
        SurfaceDensity(self.0 + rhs.0)
    }
}

impl Sub for SurfaceDensity {
    type Output = SurfaceDensity;

    fn sub(self, rhs: SurfaceDensity) -> SurfaceDensity {
        SurfaceDensity(self.0 - rhs.0)
    }
}

impl Mul<f64> for SurfaceDensity {
    type Output = SurfaceDensity;

    fn mul(self, rhs: f64) -> SurfaceDensity {
        SurfaceDensity(self.0 * rhs)
    }
}

impl Div<f64> for SurfaceDensity {
    type Output = SurfaceDensity;

    fn div(self, rhs: f64) -> SurfaceDensity {
        SurfaceDensity(self.0 / rhs)
    }
}
